use crate::errors::AlpacaResult;
use crate::params::Form;

device_facade! {
    /// Focuser Specific Methods.
    pub struct Focuser(Focuser) {
        /// True if the focuser is capable of absolute position; that is, being commanded to a specific step location.
        fn absolute() -> bool = "absolute";
        /// True if the focuser is currently moving to a new position.
        fn is_moving() -> bool = "ismoving";
        /// Maximum increment size allowed by the focuser.
        fn max_increment() -> i32 = "maxincrement";
        /// Maximum step position permitted.
        fn max_step() -> i32 = "maxstep";
        /// Current focuser position, in steps.
        fn position() -> i32 = "position";
        /// Step size (microns) for the focuser.
        fn step_size() -> f64 = "stepsize";
        /// The state of temperature compensation mode (if available), else always False.
        fn temp_comp() -> bool = "tempcomp";
        /// True if focuser has temperature compensation available.
        fn temp_comp_available() -> bool = "tempcompavailable";
        /// Current ambient temperature as measured by the focuser.
        fn temperature() -> f64 = "temperature";
    }
}

impl Focuser {
    /// Sets the state of temperature compensation mode.
    pub async fn set_temp_comp(&self, temp_comp: bool) -> AlpacaResult {
        self.device
            .put("tempcomp", Form::new().with("TempComp", temp_comp))
            .await
    }

    /// Immediately stop any focuser motion due to a previous Move() method call.
    pub async fn halt(&self) -> AlpacaResult {
        self.device.put("halt", Form::new()).await
    }

    /// Moves the focuser by the specified amount or to the specified position depending on the value of the Absolute property.
    pub async fn move_(&self, position: i32) -> AlpacaResult {
        self.device
            .put("move", Form::new().with("Position", position))
            .await
    }
}
