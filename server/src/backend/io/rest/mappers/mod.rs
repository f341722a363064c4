pub mod sale_mapper;
