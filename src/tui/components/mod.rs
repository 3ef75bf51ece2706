//! # TUI Components
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: top status bar showing endpoint and status
//! - `MessageView`: a single chat message
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `InputBox`: single-line input and send trigger
//! - `MessageList`: scrollable display sequence with layout caching
//!
//! Each component file holds its state types, events, rendering, event
//! handling, and tests. Components receive external data as props, never by
//! reaching into `App`.
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs     (Top status bar)
//! ├── message.rs       (Single message renderer)
//! ├── message_list.rs  (Scrollable message container)
//! └── input_box/       (Single-line input with cursor state)
//! ```

pub mod input_box;
pub mod message;
pub mod message_list;
mod title_bar;

pub use input_box::{INPUT_HEIGHT, InputBox, InputEvent};
pub use message::MessageView;
pub use message_list::{MessageList, MessageListState};
pub use title_bar::TitleBar;
