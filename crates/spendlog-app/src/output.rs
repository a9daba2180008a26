//! Transient user notices, themed.

use colored::Colorize;
use spendlog_config::Theme;

pub fn info(theme: Theme, message: &str) {
    match theme {
        Theme::Light => println!("{}", message.green()),
        Theme::Dark => println!("{}", message.bright_green()),
    }
}

pub fn error(theme: Theme, message: &str) {
    match theme {
        Theme::Light => eprintln!("{}", message.red()),
        Theme::Dark => eprintln!("{}", message.bright_red()),
    }
}
