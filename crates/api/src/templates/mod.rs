mod home;
mod layouts;

pub use home::home_page;
