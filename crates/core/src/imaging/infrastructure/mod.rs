pub mod image_file_reader;
