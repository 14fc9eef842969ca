//! Shared application services
//!
//! One [`Services`] value is built by the engine and lent to every component
//! hook through its context. Nothing here is global: tearing down the engine
//! tears down the services with it.

use std::any::Any;
use std::collections::VecDeque;

use crate::core::{DebugSettings, Display, EngineConfig};
use crate::foundation::time::FrameTime;
use crate::input::{NoInput, TouchInput};
use crate::render::{MeshRegistry, NullRenderer, Renderer};

/// Outgoing messages from components to the host application
#[derive(Default)]
pub struct Messenger {
    outbox: VecDeque<Box<dyn Any>>,
}

impl Messenger {
    /// Queue a message for the host
    pub fn send_message<T: Any>(&mut self, message: T) {
        self.outbox.push_back(Box::new(message));
    }

    /// Remove and return every queued message of type `T`, keeping the others
    pub fn take_messages<T: Any>(&mut self) -> Vec<T> {
        let mut taken = Vec::new();
        let mut kept = VecDeque::with_capacity(self.outbox.len());
        for message in self.outbox.drain(..) {
            match message.downcast::<T>() {
                Ok(message) => taken.push(*message),
                Err(other) => kept.push_back(other),
            }
        }
        self.outbox = kept;
        taken
    }

    /// Number of queued messages
    pub fn len(&self) -> usize {
        self.outbox.len()
    }

    /// Whether nothing is queued
    pub fn is_empty(&self) -> bool {
        self.outbox.is_empty()
    }
}

impl std::fmt::Debug for Messenger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Messenger").field("queued", &self.outbox.len()).finish()
    }
}

/// Services available to every component
pub struct Services {
    /// Draw interface of the platform layer
    pub renderer: Box<dyn Renderer>,
    /// Touch source of the platform layer
    pub input: Box<dyn TouchInput>,
    /// Time of the current frame
    pub time: FrameTime,
    /// Display metrics
    pub display: Display,
    /// Runtime debug toggles
    pub debug: DebugSettings,
    /// Named mesh handles
    pub meshes: MeshRegistry,
    /// Messages for the host application
    pub messenger: Messenger,
}

impl Services {
    /// Build services from configuration and the platform's renderer and input
    pub fn new(config: &EngineConfig, renderer: Box<dyn Renderer>, input: Box<dyn TouchInput>) -> Self {
        Self {
            renderer,
            input,
            time: FrameTime::default(),
            display: config.display,
            debug: config.debug,
            meshes: MeshRegistry::new(),
            messenger: Messenger::default(),
        }
    }

    /// Services with no renderer output and no input
    pub fn headless(config: &EngineConfig) -> Self {
        Self::new(config, Box::new(NullRenderer), Box::new(NoInput))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_messages_filters_by_type() {
        let mut messenger = Messenger::default();
        messenger.send_message(60.0_f32);
        messenger.send_message("hello");
        messenger.send_message(30.0_f32);

        assert_eq!(messenger.take_messages::<f32>(), vec![60.0, 30.0]);
        assert_eq!(messenger.len(), 1);
        assert_eq!(messenger.take_messages::<&str>(), vec!["hello"]);
        assert!(messenger.is_empty());
    }
}
