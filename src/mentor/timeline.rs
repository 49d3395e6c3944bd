use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;

use crate::mentor::session::{MentorSession, ScheduledAppend};

pub type SharedSession = Arc<Mutex<MentorSession>>;

/// Applies scheduled appends to a session one at a time, in the order they
/// were scheduled. Each append waits out its own delay first, so a short delay
/// never overtakes a longer one queued ahead of it.
///
/// A quiz question whose quiz was abandoned or replaced while it waited is
/// skipped. Dropping the timeline stops the worker; anything still pending is
/// discarded.
pub struct Timeline {
    queue: mpsc::UnboundedSender<ScheduledAppend>,
    worker: JoinHandle<()>,
}

impl Timeline {
    /// Spawns the worker. Every append is forwarded to `sink` right after its
    /// message has been recorded in the session log.
    pub fn spawn(session: SharedSession, sink: mpsc::UnboundedSender<ScheduledAppend>) -> Self {
        let (queue, mut pending) = mpsc::unbounded_channel::<ScheduledAppend>();

        let worker = tokio::spawn(async move {
            while let Some(append) = pending.recv().await {
                if !append.delay.is_zero() {
                    tokio::time::sleep(append.delay).await;
                }
                {
                    let mut session = session.lock().await;
                    if !session.is_current(&append) {
                        log::debug!("Skipping question of a superseded quiz");
                        continue;
                    }
                    session.record(append.message.clone());
                }

                if sink.send(append).is_err() {
                    log::warn!("Timeline sink closed, stopping");
                    break;
                }
            }
        });

        Self { queue, worker }
    }

    pub fn schedule(&self, appends: Vec<ScheduledAppend>) {
        for append in appends {
            if self.queue.send(append).is_err() {
                log::warn!("Timeline worker is gone, dropping scheduled message");
                return;
            }
        }
    }
}

impl Drop for Timeline {
    fn drop(&mut self) {
        self.worker.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mentor::session::Pacing;
    use crate::mentor::subject::Subject;
    use crate::mentor::{Message, MessageKind};
    use std::time::Duration;
    use tokio::time::Instant;

    fn shared() -> SharedSession {
        Arc::new(Mutex::new(MentorSession::new(Pacing::default())))
    }

    fn reply(text: &str) -> Message {
        Message::assistant(text, None, MessageKind::Response)
    }

    #[tokio::test(start_paused = true)]
    async fn appends_keep_emission_order_despite_delays() {
        let session = shared();
        let (sink, mut delivered) = mpsc::unbounded_channel();
        let timeline = Timeline::spawn(session.clone(), sink);

        let first = Message::user("question", None);
        let second = reply("slow answer");
        let third = reply("quick follow-up");
        let started = Instant::now();
        timeline.schedule(vec![
            ScheduledAppend::now(first.clone()),
            ScheduledAppend::after(Duration::from_millis(1000), second.clone()),
            ScheduledAppend::after(Duration::from_millis(10), third.clone()),
        ]);

        let mut received = Vec::new();
        for _ in 0..3 {
            received.push(delivered.recv().await.unwrap().message.id);
        }
        assert!(started.elapsed() >= Duration::from_millis(1010));
        assert_eq!(received, vec![first.id.clone(), second.id.clone(), third.id.clone()]);

        let guard = session.lock().await;
        let logged = guard.log().messages().iter().map(|m| m.id.clone()).collect::<Vec<_>>();
        assert_eq!(logged, vec![first.id, second.id, third.id]);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_timeline_discards_pending_appends() {
        let session = shared();
        let (sink, mut delivered) = mpsc::unbounded_channel();
        let timeline = Timeline::spawn(session.clone(), sink);

        timeline.schedule(vec![ScheduledAppend::after(
            Duration::from_millis(1000),
            reply("never shown"),
        )]);
        tokio::time::sleep(Duration::from_millis(100)).await;
        drop(timeline);
        tokio::time::sleep(Duration::from_millis(2000)).await;

        assert!(delivered.recv().await.is_none());
        assert!(session.lock().await.log().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn quiz_follow_ups_arrive_after_the_answer() {
        let session = shared();
        let (sink, mut delivered) = mpsc::unbounded_channel();
        let timeline = Timeline::spawn(session.clone(), sink);

        let start = session.lock().await.start_quiz("");
        timeline.schedule(start);
        let answer = session.lock().await.answer("x = 10");
        timeline.schedule(answer);

        let mut texts = Vec::new();
        for _ in 0..4 {
            texts.push(delivered.recv().await.unwrap().message.text);
        }
        assert!(texts[0].starts_with("Quiz time!"));
        assert_eq!(texts[1], "x = 10");
        assert!(texts[2].starts_with("Not quite."));
        assert!(texts[3].contains("0/5"));
    }

    #[tokio::test(start_paused = true)]
    async fn abandoned_quiz_question_is_never_shown() {
        let session = shared();
        let (sink, mut delivered) = mpsc::unbounded_channel();
        let timeline = Timeline::spawn(session.clone(), sink);

        let start = session.lock().await.start_quiz("");
        timeline.schedule(start);
        session.lock().await.switch_subject(Some(Subject::Science));
        tokio::time::sleep(Duration::from_millis(1100)).await;

        assert!(delivered.try_recv().is_err());
        assert!(session.lock().await.log().is_empty());

        let reply = session.lock().await.turn("x = 5");
        timeline.schedule(reply);
        let mut texts = Vec::new();
        for _ in 0..2 {
            texts.push(delivered.recv().await.unwrap().message.text);
        }
        assert_eq!(texts[0], "x = 5");
        assert!(texts[1].starts_with("I can help with Science"));
        assert_eq!(session.lock().await.log().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn pending_explanation_keeps_no_keyboard_when_a_new_quiz_starts() {
        let session = shared();
        let (sink, mut delivered) = mpsc::unbounded_channel();
        let timeline = Timeline::spawn(session.clone(), sink);

        let start = session.lock().await.start_quiz("");
        timeline.schedule(start);
        let first = delivered.recv().await.unwrap();
        assert_eq!(first.question.map(|cue| cue.options.len()), Some(4));

        let answer = session.lock().await.answer("x = 5");
        timeline.schedule(answer);
        session.lock().await.set_subject(Some(Subject::English));
        let next = session.lock().await.start_quiz("");
        timeline.schedule(next);

        let mut rest = Vec::new();
        for _ in 0..4 {
            rest.push(delivered.recv().await.unwrap());
        }
        assert!(rest[1].message.text.starts_with("Correct!"));
        assert!(rest[1].question.is_none());
        assert!(rest[2].message.text.contains("1/5"));
        assert!(rest[2].question.is_none());
        assert!(rest[3].message.text.contains("Which word is a verb"));
        assert_eq!(rest[3].question.map(|cue| cue.options), Some(&["cat", "sleeps", "mat", "the"][..]));
    }
}
