use crate::errors::AlpacaResult;
use crate::params::Form;

device_facade! {
    /// Rotator Specific Methods.
    pub struct Rotator(Rotator) {
        /// True if the Rotator supports the Reverse method.
        fn can_reverse() -> bool = "canreverse";
        /// True if the rotator is currently moving to a new position. False if the focuser is stationary.
        fn is_moving() -> bool = "ismoving";
        /// Returns the raw mechanical position of the rotator in degrees.
        fn mechanical_position() -> f64 = "mechanicalposition";
        /// Current instantaneous Rotator position, in degrees.
        fn position() -> f64 = "position";
        /// Returns the rotator's Reverse state.
        fn reverse() -> bool = "reverse";
        /// The minimum StepSize, in degrees.
        fn step_size() -> f64 = "stepsize";
        /// The destination position angle for Move() and MoveAbsolute().
        fn target_position() -> f64 = "targetposition";
    }
}

impl Rotator {
    /// Sets the rotator's Reverse state.
    pub async fn set_reverse(&self, reverse: bool) -> AlpacaResult {
        self.device
            .put("reverse", Form::new().with("Reverse", reverse))
            .await
    }

    /// Immediately stop any Rotator motion due to a previous Move or MoveAbsolute method call.
    pub async fn halt(&self) -> AlpacaResult {
        self.device.put("halt", Form::new()).await
    }

    /// Causes the rotator to move Position degrees relative to the current Position value.
    pub async fn move_(&self, position: f64) -> AlpacaResult {
        self.device
            .put("move", Form::new().with("Position", position))
            .await
    }

    /// Causes the rotator to move the absolute position of Position degrees.
    pub async fn move_absolute(&self, position: f64) -> AlpacaResult {
        self.device
            .put("moveabsolute", Form::new().with("Position", position))
            .await
    }

    /// Causes the rotator to move the mechanical position of Position degrees.
    pub async fn move_mechanical(&self, position: f64) -> AlpacaResult {
        self.device
            .put("movemechanical", Form::new().with("Position", position))
            .await
    }

    /// Causes the rotator to sync to the position of Position degrees.
    pub async fn sync(&self, position: f64) -> AlpacaResult {
        self.device
            .put("sync", Form::new().with("Position", position))
            .await
    }
}
