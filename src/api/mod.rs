pub mod sleeper;
