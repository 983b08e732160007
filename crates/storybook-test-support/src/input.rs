//! Scripted input source.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use storybook_core::input::{InputEvent, InputSource};

/// The source half: handed to the engine as `Box<dyn InputSource>`.
#[derive(Debug)]
pub struct ScriptedInput {
    queue: Arc<Mutex<VecDeque<InputEvent>>>,
}

/// The test half: pushes events for the next tick to consume.
#[derive(Debug, Clone)]
pub struct InputControl {
    queue: Arc<Mutex<VecDeque<InputEvent>>>,
}

impl ScriptedInput {
    #[must_use]
    pub fn new() -> (Self, InputControl) {
        let queue = Arc::new(Mutex::new(VecDeque::new()));
        (
            Self {
                queue: Arc::clone(&queue),
            },
            InputControl { queue },
        )
    }
}

impl InputSource for ScriptedInput {
    fn poll_event(&mut self) -> Option<InputEvent> {
        self.queue.lock().unwrap().pop_front()
    }
}

impl InputControl {
    pub fn push(&self, event: InputEvent) {
        self.queue.lock().unwrap().push_back(event);
    }
}
