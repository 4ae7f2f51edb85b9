pub mod register_volunteer;
