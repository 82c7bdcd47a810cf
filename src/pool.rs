//! Fixed-size worker pool feeding on one FIFO task queue.

use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};

use log::error;

type Task = Box<dyn FnOnce() + Send + 'static>;

// The stop flag lives under the same mutex as the queue, so a worker's wait
// predicate observes both atomically.
struct PoolState {
    tasks: VecDeque<Task>,
    stop: bool,
}

struct Shared {
    state: Mutex<PoolState>,
    task_ready: Condvar,
}

/// A fixed set of worker threads consuming submitted tasks in FIFO order.
///
/// Tasks are dequeued FIFO; execution order across workers is unordered.
/// Dropping the pool wakes every worker, including those blocked on an empty
/// queue, and joins them. Tasks still queued but not started are discarded;
/// tasks already running finish first.
pub struct ThreadPool {
    shared: Arc<Shared>,
    workers: Vec<JoinHandle<()>>,
}

impl ThreadPool {
    /// Spawn a pool with `thread_count` workers.
    ///
    /// # Panics
    /// Panics if `thread_count` is zero.
    pub fn new(thread_count: usize) -> Self {
        assert!(thread_count > 0, "thread pool needs at least one worker");

        let shared = Arc::new(Shared {
            state: Mutex::new(PoolState {
                tasks: VecDeque::new(),
                stop: false,
            }),
            task_ready: Condvar::new(),
        });

        let workers = (0..thread_count)
            .map(|_| {
                let shared = Arc::clone(&shared);
                thread::spawn(move || worker_main(&shared))
            })
            .collect();

        Self { shared, workers }
    }

    /// Number of worker threads.
    pub fn thread_count(&self) -> usize {
        self.workers.len()
    }

    /// Enqueue a task and wake one idle worker.
    pub fn submit<F>(&self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let mut state = self.shared.state.lock().unwrap();
        state.tasks.push_back(Box::new(task));
        drop(state);
        self.shared.task_ready.notify_one();
    }
}

impl Default for ThreadPool {
    /// Pool sized to the machine's available parallelism.
    fn default() -> Self {
        let threads = thread::available_parallelism().map(|n| n.get()).unwrap_or(1);
        Self::new(threads)
    }
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        self.shared.state.lock().unwrap().stop = true;
        self.shared.task_ready.notify_all();
        for worker in self.workers.drain(..) {
            let _ = worker.join();
        }
    }
}

fn worker_main(shared: &Shared) {
    loop {
        let task = {
            let mut state = shared.state.lock().unwrap();
            loop {
                if state.stop {
                    return;
                }
                match state.tasks.pop_front() {
                    Some(task) => break task,
                    None => state = shared.task_ready.wait(state).unwrap(),
                }
            }
        };

        // A panicking task must not take the worker down with it; whoever
        // waits on the task's result sees its channel close instead.
        if panic::catch_unwind(AssertUnwindSafe(task)).is_err() {
            error!("a pool task panicked; its result will never be delivered");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::mpsc;
    use std::time::Duration;

    use super::*;

    #[test]
    fn executes_all_submitted_tasks() {
        let pool = ThreadPool::new(4);
        let counter = Arc::new(AtomicUsize::new(0));
        let (sender, receiver) = mpsc::channel();

        for _ in 0..32 {
            let counter = Arc::clone(&counter);
            let sender = sender.clone();
            pool.submit(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                sender.send(()).unwrap();
            });
        }
        for _ in 0..32 {
            receiver.recv_timeout(Duration::from_secs(5)).unwrap();
        }
        assert_eq!(counter.load(Ordering::SeqCst), 32);
    }

    #[test]
    fn idle_workers_pick_up_late_tasks() {
        let pool = ThreadPool::new(2);
        // Give the workers time to block on the empty queue.
        thread::sleep(Duration::from_millis(50));

        let (sender, receiver) = mpsc::channel();
        pool.submit(move || sender.send(()).unwrap());
        receiver.recv_timeout(Duration::from_secs(5)).unwrap();
    }

    #[test]
    fn shutdown_with_idle_workers_does_not_deadlock() {
        let (sender, receiver) = mpsc::channel();
        thread::spawn(move || {
            let pool = ThreadPool::new(4);
            // Workers are blocked waiting on an empty queue by now; drop
            // must still wake and join them all.
            thread::sleep(Duration::from_millis(50));
            drop(pool);
            sender.send(()).unwrap();
        });
        receiver
            .recv_timeout(Duration::from_secs(5))
            .expect("pool shutdown deadlocked");
    }

    #[test]
    fn panicking_task_does_not_kill_the_pool() {
        let pool = ThreadPool::new(1);
        pool.submit(|| panic!("task gone wrong"));

        let (sender, receiver) = mpsc::channel();
        pool.submit(move || sender.send(()).unwrap());
        receiver.recv_timeout(Duration::from_secs(5)).unwrap();
    }

    #[test]
    #[should_panic]
    fn zero_workers_is_rejected() {
        ThreadPool::new(0);
    }
}
