use super::device::ensure_in_range;
use crate::errors::AlpacaResult;
use crate::params::Form;

device_facade! {
    /// FilterWheel Specific Methods.
    pub struct FilterWheel(FilterWheel) {
        /// An integer array of filter focus offsets.
        fn focus_offsets() -> Vec<i32> = "focusoffsets";
        /// The names of the filters.
        fn names() -> Vec<String> = "names";
        /// Returns the current filter wheel position, or -1 while the wheel is moving.
        fn position() -> i32 = "position";
    }
}

impl FilterWheel {
    /// Sets the filter wheel position.
    pub async fn set_position(&self, position: i32) -> AlpacaResult {
        let position = ensure_in_range("Position", position, 0.., "non-negative")?;
        self.device
            .put("position", Form::new().with("Position", position))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{MockReply, MockServer};

    #[tokio::test]
    async fn filters() -> eyre::Result<()> {
        let server = MockServer::start().await?;
        let wheel = FilterWheel::new(&server.config(), 0);

        server.reply_with(MockReply::value(["Red", "Green", "Blue"]));
        assert_eq!(wheel.names().await?, ["Red", "Green", "Blue"]);

        server.reply_with(MockReply::value([0, -20, 15]));
        assert_eq!(wheel.focus_offsets().await?, [0, -20, 15]);

        server.reply_with(MockReply::value(-1));
        assert_eq!(wheel.position().await?, -1);

        assert!(wheel.set_position(-1).await.is_err());
        assert_eq!(wheel.client().transaction_id(), 0);

        server.reply_with(MockReply::ack());
        wheel.set_position(2).await?;
        assert_eq!(server.last_request().param("Position").as_deref(), Some("2"));
        assert_eq!(wheel.client().transaction_id(), 1);
        Ok(())
    }
}
