use crossterm::event::{KeyEvent, KeyEventKind};
use futures::StreamExt;
use tokio::sync::mpsc;

#[derive(Debug, Clone)]
pub enum Event {
    Key(KeyEvent),
    Tick, // Redraw timer (expires flash messages)
}

pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            let mut reader = crossterm::event::EventStream::new();
            let mut tick_interval =
                tokio::time::interval(std::time::Duration::from_millis(tick_rate_ms));

            loop {
                tokio::select! {
                    maybe_event = reader.next() => {
                        match maybe_event {
                            Some(Ok(crossterm::event::Event::Key(key))) => {
                                // Filter for Press only (Windows compatibility)
                                if key.kind == KeyEventKind::Press && tx.send(Event::Key(key)).is_err() {
                                    break;
                                }
                            }
                            Some(_) => {}
                            // Input stream closed
                            None => break,
                        }
                    }
                    _ = tick_interval.tick() => {
                        if tx.send(Event::Tick).is_err() {
                            break;
                        }
                    }
                }
            }
        });

        EventHandler { rx }
    }

    /// Next event, or `None` once the input stream has closed.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_next_ends_when_sender_dropped() {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut events = EventHandler { rx };
        tx.send(Event::Tick).unwrap();
        drop(tx);

        assert!(matches!(events.next().await, Some(Event::Tick)));
        assert!(events.next().await.is_none());
    }
}
