use {
    crate::{Alert, NotifyError},
    futures_util::future::BoxFuture,
    guardian::Guardian,
    speak::{Insult, InsultGenerator},
};

/// Delivers alerts to guardians.
pub trait Notifier: Send + Sync + 'static {
    fn notify<'a>(
        &'a self,
        guardian: &'a Guardian,
        alert: &'a Alert,
    ) -> BoxFuture<'a, Result<(), NotifyError>>;
}

/// Produces insults. Never fails; a degraded source returns the fallback line.
pub trait InsultSource: Send + Sync + 'static {
    fn insult<'a>(&'a self, voice_id: Option<&'a str>) -> BoxFuture<'a, Insult>;
}

impl InsultSource for InsultGenerator {
    fn insult<'a>(&'a self, voice_id: Option<&'a str>) -> BoxFuture<'a, Insult> {
        Box::pin(self.generate_or_fallback(voice_id))
    }
}
