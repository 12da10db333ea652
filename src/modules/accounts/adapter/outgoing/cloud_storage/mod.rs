pub mod picture_store_gcs;

pub use picture_store_gcs::GcsPictureStore;
