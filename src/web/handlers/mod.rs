pub mod post_handlers;
pub mod research_handlers;
pub mod system_handlers;

pub use post_handlers::*;
pub use research_handlers::*;
pub use system_handlers::*;
