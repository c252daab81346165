// crates/fovstream-core/src/queue.rs
//
// BoundedQueue<T>: single-producer/single-consumer blocking FIFO with a
// null-payload sentinel for end-of-stream.
//
// Built directly on Mutex + Condvar rather than crossbeam_channel's bounded
// MPMC channel, because the sentinel here has to be an in-band payload value
// (enqueue(None)) rather than a channel-closed signal — a consumer that
// dequeues the sentinel must still be able to tell it apart from "the queue
// is merely empty right now" and forward it on. Backing storage is a ring
// buffer of `capacity + 1` slots: front == rear means empty, and
// (rear + 1) % (capacity + 1) == front means full — the classic circular
// buffer trick that avoids a separate count field.

use std::sync::{Condvar, Mutex};

enum Slot<T> {
    Item(T),
    Sentinel,
}

struct Ring<T> {
    slots: Vec<Option<Slot<T>>>,
    front: usize,
    rear: usize,
}

pub struct BoundedQueue<T> {
    capacity: usize,
    ring: Mutex<Ring<T>>,
    not_full: Condvar,
    not_empty: Condvar,
}

impl<T> BoundedQueue<T> {
    /// Allocate storage for `capacity` payloads (plus one boundary slot).
    ///
    /// Panics if `capacity` is 0 — a zero-capacity queue can never hold even
    /// a single in-flight payload, and every queue in this pipeline needs at
    /// least one.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity >= 1, "BoundedQueue capacity must be >= 1");
        let slot_count = capacity + 1;
        Self {
            capacity,
            ring: Mutex::new(Ring {
                slots: (0..slot_count).map(|_| None).collect(),
                front: 0,
                rear: 0,
            }),
            not_full: Condvar::new(),
            not_empty: Condvar::new(),
        }
    }

    fn is_empty(ring: &Ring<T>) -> bool {
        ring.front == ring.rear
    }

    fn is_full(ring: &Ring<T>, capacity: usize) -> bool {
        (ring.rear + 1) % (capacity + 1) == ring.front
    }

    /// Enqueue a payload, blocking while the queue is full.
    ///
    /// `None` enqueues the end-of-stream sentinel — always permitted even
    /// when the queue would otherwise be considered "empty of real work";
    /// the sentinel occupies a slot like any other payload.
    pub fn enqueue(&self, payload: Option<T>) {
        let mut ring = self.ring.lock().unwrap();
        while Self::is_full(&ring, self.capacity) {
            ring = self.not_full.wait(ring).unwrap();
        }
        let slot = match payload {
            Some(v) => Slot::Item(v),
            None => Slot::Sentinel,
        };
        ring.slots[ring.rear] = Some(slot);
        ring.rear = (ring.rear + 1) % (self.capacity + 1);
        drop(ring);
        self.not_empty.notify_one();
    }

    /// Dequeue the next payload, blocking while the queue is empty.
    ///
    /// Returns `None` when the dequeued payload is the end-of-stream
    /// sentinel — the caller is responsible for forwarding it onward and
    /// terminating, per the pipeline's shutdown protocol.
    pub fn dequeue(&self) -> Option<T> {
        let mut ring = self.ring.lock().unwrap();
        while Self::is_empty(&ring) {
            ring = self.not_empty.wait(ring).unwrap();
        }
        let slot = ring.slots[ring.front]
            .take()
            .expect("occupied slot between front and rear must hold a payload");
        ring.front = (ring.front + 1) % (self.capacity + 1);
        drop(ring);
        self.not_full.notify_one();
        match slot {
            Slot::Item(v) => Some(v),
            Slot::Sentinel => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn fifo_order_preserved_single_producer_single_consumer() {
        for capacity in [1usize, 2, 3, 8, 37] {
            let q = Arc::new(BoundedQueue::<u32>::new(capacity));
            let n = 500u32;

            let producer = {
                let q = Arc::clone(&q);
                thread::spawn(move || {
                    for i in 0..n {
                        q.enqueue(Some(i));
                    }
                    q.enqueue(None);
                })
            };

            let mut received = Vec::with_capacity(n as usize);
            loop {
                match q.dequeue() {
                    Some(v) => received.push(v),
                    None => break,
                }
            }
            producer.join().unwrap();

            assert_eq!(received.len(), n as usize, "capacity={capacity}: no loss/duplication");
            assert!(received.windows(2).all(|w| w[0] < w[1]), "capacity={capacity}: strict FIFO order");
        }
    }

    #[test]
    fn enqueue_blocks_when_full_and_unblocks_on_dequeue() {
        let q = Arc::new(BoundedQueue::<u32>::new(1));
        q.enqueue(Some(1));

        let q2 = Arc::clone(&q);
        let handle = thread::spawn(move || {
            // This would block forever if `enqueue` didn't respect capacity.
            q2.enqueue(Some(2));
        });

        // Give the producer a moment to actually block on not_full.
        thread::sleep(std::time::Duration::from_millis(20));
        assert_eq!(q.dequeue(), Some(1));
        handle.join().unwrap();
        assert_eq!(q.dequeue(), Some(2));
    }

    #[test]
    fn sentinel_is_terminal_and_distinguishable_from_payload() {
        let q = BoundedQueue::<u32>::new(4);
        q.enqueue(Some(7));
        q.enqueue(None);
        assert_eq!(q.dequeue(), Some(7));
        assert_eq!(q.dequeue(), None);
    }
}
