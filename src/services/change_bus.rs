use std::sync::{Arc, Weak};
use dashmap::DashMap;
use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};
use uuid::Uuid;
use crate::enums::marker_event::MarkerEvent;
use crate::enums::topic::Topic;

struct Subscriber {
    topics: Vec<Topic>,
    sender: UnboundedSender<MarkerEvent>,
}

/// Topic based fan-out of marker events. Publishing never blocks.
#[derive(Default)]
pub struct ChangeBus {
    subscribers: DashMap<Uuid, Subscriber>,
}

impl ChangeBus {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn subscribe(self: &Arc<Self>, topics: &[Topic]) -> Subscription {
        let (sender, receiver) = mpsc::unbounded_channel();
        let id = Uuid::new_v4();

        self.subscribers.insert(
            id,
            Subscriber {
                topics: topics.to_vec(),
                sender,
            },
        );
        log::debug!("Subscriber {} registered for {} topics", id, topics.len());

        Subscription {
            id,
            bus: Arc::downgrade(self),
            receiver,
        }
    }

    /// Deliver an event to every subscriber of its topic, returns the number of deliveries.
    pub fn publish(&self, event: MarkerEvent) -> usize {
        let topic = event.topic();
        let mut delivered = 0;
        let mut closed = Vec::new();

        for entry in self.subscribers.iter() {
            if !entry.topics.contains(&topic) {
                continue;
            }
            match entry.sender.send(event.clone()) {
                Ok(()) => delivered += 1,
                Err(_) => closed.push(*entry.key()),
            }
        }

        for id in closed {
            self.subscribers.remove(&id);
        }

        log::debug!("Published {} to {} subscribers", topic.name(), delivered);
        delivered
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn unsubscribe(&self, id: &Uuid) {
        self.subscribers.remove(id);
    }
}

/// Receiving end of a bus subscription; unsubscribes when dropped.
pub struct Subscription {
    id: Uuid,
    bus: Weak<ChangeBus>,
    receiver: UnboundedReceiver<MarkerEvent>,
}

impl Subscription {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub async fn recv(&mut self) -> Option<MarkerEvent> {
        self.receiver.recv().await
    }

    pub fn try_recv(&mut self) -> Option<MarkerEvent> {
        match self.receiver.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Everything queued right now, in publish order.
    pub fn drain(&mut self) -> Vec<MarkerEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.try_recv() {
            events.push(event);
        }
        events
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(bus) = self.bus.upgrade() {
            bus.unsubscribe(&self.id);
        }
    }
}
