device_facade! {
    /// SafetyMonitor Specific Methods.
    pub struct SafetyMonitor(SafetyMonitor) {
        /// Indicates whether the monitored state is safe for use.
        fn is_safe() -> bool = "issafe";
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ASCOMErrorCode;
    use crate::test_utils::{MockReply, MockServer};

    #[tokio::test]
    async fn is_safe() -> eyre::Result<()> {
        let server = MockServer::start().await?;
        let monitor = SafetyMonitor::new(&server.config(), 0);

        server.reply_with(MockReply::value(true));
        assert!(monitor.is_safe().await?);
        assert_eq!(server.last_request().path, "/api/v1/safetymonitor/0/issafe");

        server.reply_with(MockReply::value(false).device_error(0x407, "Not connected"));
        let err = monitor
            .is_safe()
            .await
            .expect_err("device error must be surfaced");
        assert_eq!(err.device_code(), Some(ASCOMErrorCode::NOT_CONNECTED));
        Ok(())
    }
}
