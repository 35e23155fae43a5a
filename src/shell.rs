//! Navigation Shell
//!
//! Interactive loop: one view mounted at a time, commands read line by line,
//! the screen redrawn on every command and every state change of the
//! mounted view.

use std::io::Write;
use std::str::FromStr;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::client::DashboardApi;
use crate::config::PollingConfig;
use crate::models::AlertFilter;
use crate::render::TextBarChart;
use crate::views::{MountedView, Route};

const HELP: &str = "\
Commands:
  h | m | a            switch to hospitals, medicines, alerts
  s <term>             search (hospitals, medicines); `s` alone clears
  f <all|bed|medicine> filter alerts by type
  n | p                next / previous medicine page
  r                    redraw
  ?                    this help
  q                    quit";

/// One line of shell input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Go(Route),
    Search(String),
    Filter(AlertFilter),
    NextPage,
    PrevPage,
    Redraw,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };

        match head {
            "" | "r" => Ok(Command::Redraw),
            "h" | "m" | "a" => Ok(Command::Go(head.parse()?)),
            "s" => Ok(Command::Search(rest.to_string())),
            "f" => Ok(Command::Filter(rest.parse()?)),
            "n" => Ok(Command::NextPage),
            "p" => Ok(Command::PrevPage),
            "?" | "help" => Ok(Command::Help),
            "q" | "quit" | "exit" => Ok(Command::Quit),
            other => Err(format!("Unknown command: {} (? for help)", other)),
        }
    }
}

/// Interactive dashboard over a line-oriented input
pub struct Shell<W: Write> {
    api: Arc<dyn DashboardApi>,
    polling: PollingConfig,
    chart: TextBarChart,
    view: MountedView,
    out: W,
    clear_screen: bool,
    notice: Option<String>,
}

impl<W: Write> Shell<W> {
    pub fn new(api: Arc<dyn DashboardApi>, polling: PollingConfig, route: Route, out: W) -> Self {
        let view = MountedView::mount(route, api.clone(), &polling);
        Self {
            api,
            polling,
            chart: TextBarChart::default(),
            view,
            out,
            clear_screen: false,
            notice: None,
        }
    }

    /// Clear the terminal before each redraw
    pub fn with_clear_screen(mut self, clear: bool) -> Self {
        self.clear_screen = clear;
        self
    }

    pub fn route(&self) -> Route {
        self.view.route()
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Run until `q` or end of input
    pub async fn run<R>(&mut self, input: R) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        self.draw()?;

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        tracing::debug!("Input closed");
                        break;
                    };
                    match line.parse::<Command>() {
                        Ok(Command::Quit) => break,
                        Ok(command) => self.apply(command),
                        Err(e) => self.notice = Some(e),
                    }
                    self.draw()?;
                }
                _ = self.view.changed() => {
                    self.draw()?;
                }
            }
        }

        Ok(())
    }

    /// Apply one command to the mounted view
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Go(route) => {
                if route != self.view.route() {
                    // Assigning drops the previous view and its timers.
                    self.view = MountedView::mount(route, self.api.clone(), &self.polling);
                }
            }
            Command::Search(term) => {
                if !self.view.set_search(&term) {
                    self.notice = Some(format!("The {} view has no search", self.view.route()));
                }
            }
            Command::Filter(filter) => {
                if !self.view.set_filter(filter) {
                    self.notice = Some("Type filter applies to the alerts view (a)".to_string());
                }
            }
            Command::NextPage => {
                if !self.view.next_page() {
                    self.notice = Some("Paging applies to the medicines view (m)".to_string());
                }
            }
            Command::PrevPage => {
                if !self.view.prev_page() {
                    self.notice = Some("Paging applies to the medicines view (m)".to_string());
                }
            }
            Command::Help => self.notice = Some(HELP.to_string()),
            Command::Redraw | Command::Quit => {}
        }
    }

    fn draw(&mut self) -> std::io::Result<()> {
        if self.clear_screen {
            write!(self.out, "\x1b[2J\x1b[H")?;
        }

        let tabs = [Route::Hospitals, Route::Medicines, Route::Alerts]
            .iter()
            .map(|route| {
                if *route == self.view.route() {
                    format!("[{}]", route)
                } else {
                    format!(" {} ", route)
                }
            })
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(self.out, "carewatch  {}", tabs)?;
        writeln!(self.out)?;

        let body = self.view.render(&self.chart);
        self.out.write_all(body.as_bytes())?;

        if let Some(notice) = self.notice.take() {
            writeln!(self.out)?;
            writeln!(self.out, "{}", notice)?;
        }
        writeln!(self.out)?;
        write!(self.out, "> ")?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AlertType;
    use crate::views::fake::FakeApi;

    #[test]
    fn test_parse_commands() {
        assert_eq!("a".parse::<Command>().unwrap(), Command::Go(Route::Alerts));
        assert_eq!(
            "s  insulin glargine ".parse::<Command>().unwrap(),
            Command::Search("insulin glargine".to_string())
        );
        assert_eq!("s".parse::<Command>().unwrap(), Command::Search(String::new()));
        assert_eq!(
            "f bed".parse::<Command>().unwrap(),
            Command::Filter(AlertFilter::Only(AlertType::Bed))
        );
        assert_eq!("".parse::<Command>().unwrap(), Command::Redraw);
        assert_eq!("q".parse::<Command>().unwrap(), Command::Quit);
        assert!("f icu".parse::<Command>().is_err());
        assert!("zzz".parse::<Command>().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_switches_views() {
        let api = FakeApi::new();
        let mut shell = Shell::new(api.clone(), PollingConfig::default(), Route::Hospitals, Vec::new());

        let input: &[u8] = b"m\nn\na\nf medicine\nq\n";
        shell.run(input).await.unwrap();
        assert_eq!(shell.route(), Route::Alerts);

        let out = String::from_utf8(shell.into_output()).unwrap();
        assert!(out.contains("Hospital Bed Availability"));
        assert!(out.contains("Medicine Availability"));
        assert!(out.contains("Filter: medicine"));
        assert!(out.contains("[alerts]"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_misplaced_commands_leave_a_notice() {
        let api = FakeApi::new();
        let mut shell = Shell::new(api, PollingConfig::default(), Route::Hospitals, Vec::new());

        let input: &[u8] = b"n\nbogus\n";
        shell.run(input).await.unwrap();

        let out = String::from_utf8(shell.into_output()).unwrap();
        assert!(out.contains("Paging applies to the medicines view"));
        assert!(out.contains("Unknown command: bogus"));
    }
}
