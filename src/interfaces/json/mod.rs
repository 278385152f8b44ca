pub mod output_writer;
pub mod request_reader;
