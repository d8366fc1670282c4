//! Task polling utilities
//!
//! Helpers for collecting results of tasks spawned on the tokio runtime from a
//! frame loop that must never block.

use futures::FutureExt;
use tokio::task::{JoinError, JoinHandle};

/// Result of polling a task
pub enum PollResult<T> {
    /// No task to poll (task was None)
    NoTask,
    /// Task is still running
    Pending,
    /// Task completed with result (may be Ok or join error)
    Complete(Result<T, JoinError>),
}

/// Poll an optional task handle and take its result if finished.
///
/// # Example
/// ```ignore
/// match poll_task(&mut self.directory_task) {
///     PollResult::Complete(Ok(result)) => { /* task returned */ }
///     PollResult::Complete(Err(e)) => { /* task panicked */ }
///     PollResult::Pending => ctx.request_repaint(),
///     PollResult::NoTask => {}
/// }
/// ```
pub fn poll_task<T>(task: &mut Option<JoinHandle<T>>) -> PollResult<T> {
    match task {
        None => return PollResult::NoTask,
        Some(handle) if !handle.is_finished() => return PollResult::Pending,
        Some(_) => {}
    }

    let Some(handle) = task.take() else {
        return PollResult::NoTask;
    };
    match handle.now_or_never() {
        Some(result) => PollResult::Complete(result),
        None => {
            tracing::warn!("Task not ready despite is_finished()");
            PollResult::Pending
        }
    }
}

/// Remove every finished task from `tasks`, in the order they were pushed.
///
/// Each handle is paired with a key the caller uses to route the result.
pub fn drain_finished<K, T>(tasks: &mut Vec<(K, JoinHandle<T>)>) -> Vec<(K, Result<T, JoinError>)> {
    let mut finished = Vec::new();
    let mut index = 0;

    while index < tasks.len() {
        if !tasks[index].1.is_finished() {
            index += 1;
            continue;
        }

        let (key, mut handle) = tasks.remove(index);
        match (&mut handle).now_or_never() {
            Some(result) => finished.push((key, result)),
            None => {
                tracing::warn!("Task not ready despite is_finished()");
                tasks.insert(index, (key, handle));
                index += 1;
            }
        }
    }

    finished
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    async fn settle<T>(handle: &JoinHandle<T>) {
        while !handle.is_finished() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }

    #[tokio::test]
    async fn test_poll_task_states() {
        let mut none: Option<JoinHandle<u8>> = None;
        assert!(matches!(poll_task(&mut none), PollResult::NoTask));

        let (tx, rx) = tokio::sync::oneshot::channel::<u8>();
        let mut task = Some(tokio::spawn(async move { rx.await.unwrap_or(0) }));
        assert!(matches!(poll_task(&mut task), PollResult::Pending));

        tx.send(7).unwrap();
        settle(task.as_ref().unwrap()).await;
        assert!(matches!(poll_task(&mut task), PollResult::Complete(Ok(7))));
        assert!(task.is_none());
    }

    #[tokio::test]
    async fn test_drain_finished_keeps_pending() {
        let (tx, rx) = tokio::sync::oneshot::channel::<&'static str>();
        let mut tasks = vec![
            (1u64, tokio::spawn(async { "first" })),
            (2u64, tokio::spawn(async move { rx.await.unwrap_or("dropped") })),
            (3u64, tokio::spawn(async { "third" })),
        ];
        settle(&tasks[0].1).await;
        settle(&tasks[2].1).await;

        let done = drain_finished(&mut tasks);
        let keys: Vec<u64> = done.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec![1, 3]);
        assert_eq!(tasks.len(), 1);

        tx.send("second").unwrap();
        settle(&tasks[0].1).await;
        let done = drain_finished(&mut tasks);
        assert_eq!(done[0].0, 2);
        assert_eq!(*done[0].1.as_ref().unwrap(), "second");
        assert!(tasks.is_empty());
    }
}
