device_enum! {
    /// The direction in which the guide-rate motion is to be made.
    pub enum GuideDirection {
        /// North (+ declination/altitude).
        North = 0,
        /// South (- declination/altitude).
        South = 1,
        /// East (+ right ascension/azimuth).
        East = 2,
        /// West (- right ascension/azimuth).
        West = 3,
    }
}
