pub mod supabase;
pub mod traits;

// Re-export commonly used types
pub use supabase::{StorageError, SupabaseStorage};
pub use traits::StorageBackend;
