use crate::error::ConfigurationError;
use crate::log_sink::LogSink;

/// Produces one session for a `(profile, region)` pair.
///
/// An empty `profile` selects the default credential chain. An empty `region`
/// defers to the implementation's own region precedence; a non-empty one must
/// win over anything the implementation would resolve by itself.
pub trait SessionFactory {
    type Session;

    fn create_session(
        &self,
        profile: &str,
        region: &str,
        log: &dyn LogSink,
    ) -> Result<Self::Session, ConfigurationError>;
}

impl<F, S> SessionFactory for F
where
    F: Fn(&str, &str, &dyn LogSink) -> Result<S, ConfigurationError>,
{
    type Session = S;

    fn create_session(
        &self,
        profile: &str,
        region: &str,
        log: &dyn LogSink,
    ) -> Result<S, ConfigurationError> {
        self(profile, region, log)
    }
}
