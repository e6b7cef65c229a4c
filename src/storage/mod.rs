pub mod kv_mmap;
