pub mod tarot_reading;
