mod crawler;

pub use crawler::BundCrawler;

use chrono::DateTime;
use chrono_tz::Tz;
use std::io::{self, Write};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobOffer {
    pub description: String,
    pub employer: String,
    pub end_date: DateTime<Tz>,
    pub url: String,
}

impl JobOffer {
    pub fn write_entry<W: Write>(&self, out: &mut W, ordinal: u64, base_url: &str) -> io::Result<()> {
        write!(out, "{}:\r\n", ordinal)?;
        write!(out, "\tDescription: {}\r\n", self.description)?;
        write!(out, "\tEmployer: {}\r\n", self.employer)?;
        write!(
            out,
            "\tEnd date: {}\r\n",
            self.end_date.format("%Y-%m-%d %H:%M:%S %z %Z")
        )?;
        write!(out, "\tURL: {}{}\r\n\r\n", base_url, self.url)
    }
}
