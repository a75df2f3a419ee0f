use skycast_core::{Location, Notice, Notifier, WeatherView, notify::NoticeLevel};

/// Prints notices to stderr so they don't mix with the weather output.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        eprintln!("{}", notice_line(&notice));
    }
}

fn notice_line(notice: &Notice) -> String {
    match notice.level {
        NoticeLevel::Info => format!("  {}", notice.message),
        NoticeLevel::Warning | NoticeLevel::Error => format!("! {notice}"),
    }
}

pub fn print_view(view: &WeatherView) {
    println!();
    print!("{view}");
}

pub fn print_error_line(line: &str) {
    eprintln!("{line}");
}

pub fn print_recents(recents: &[Location]) {
    if recents.is_empty() {
        println!("No recent searches yet.");
        return;
    }

    for (i, loc) in recents.iter().enumerate() {
        println!("{:>2}. {:<32} ({:.2}, {:.2})", i + 1, loc.name, loc.latitude, loc.longitude);
    }
}
