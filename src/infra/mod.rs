pub mod file_sink_adapter;
pub mod supabase_sink_adapter;

pub use file_sink_adapter::FileSink;
pub use supabase_sink_adapter::SupabaseSink;
