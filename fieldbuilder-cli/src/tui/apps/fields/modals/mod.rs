mod create_field;

pub use create_field::draw_create_field;
