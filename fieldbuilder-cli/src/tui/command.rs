use std::future::Future;
use std::pin::Pin;

pub type BoxFuture<Msg> = Pin<Box<dyn Future<Output = Msg> + Send>>;

/// Side effects requested by an app's `update`. Futures are spawned on the
/// tokio runtime and their results come back to `update` as messages.
pub enum Command<Msg> {
    None,
    Quit,
    Batch(Vec<Command<Msg>>),
    Perform(BoxFuture<Msg>),
}

impl<Msg: Send + 'static> Command<Msg> {
    /// Run an async operation and map its output into a message.
    pub fn perform<T, Fut, F>(future: Fut, to_msg: F) -> Self
    where
        T: Send + 'static,
        Fut: Future<Output = T> + Send + 'static,
        F: FnOnce(T) -> Msg + Send + 'static,
    {
        Command::Perform(Box::pin(async move { to_msg(future.await) }))
    }

    pub fn batch(commands: Vec<Command<Msg>>) -> Self {
        Command::Batch(commands)
    }
}
