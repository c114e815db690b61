pub mod patients;
