//! Adapters: concrete implementations of the port traits.
//!
//! | Adapter    | Implements      | Connects to                 |
//! |------------|-----------------|-----------------------------|
//! | `fanout`   | EventSink       | Host-managed handler list   |
//! | `log_sink` | EventSink       | `log` facade                |
//! | `sim`      | LocomotivePort  | Point-mass train model      |
//! |            | TrainInfoSource | Fixed track object list     |

pub mod fanout;
pub mod log_sink;
pub mod sim;
