pub mod reservation;
