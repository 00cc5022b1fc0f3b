pub mod progress;
pub mod stream;

pub use progress::CopyProgress;
pub use stream::streaming_mode;
