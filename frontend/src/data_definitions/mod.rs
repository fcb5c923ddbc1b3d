pub mod browser_clock;
