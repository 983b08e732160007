//! Storybook — the reading session.
//!
//! A [`session::Session`] owns the composer, the audio timeline, and the
//! input source, and pumps them from a single-threaded fixed-rate tick.
//! External controllers (the remote channel, the shell UI) never touch the
//! engine directly: they enqueue [`command::SessionCommand`]s through a
//! cloneable handle, and the tick drains the queue in FIFO order.

pub mod command;
pub mod library;
pub mod session;
