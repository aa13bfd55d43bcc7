use crate::{
    bund::JobOffer,
    markers::{self, find_from, Field, Fragments, Missing},
    Crawler, CrawlerError, ExtractionError,
};
use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone};
use chrono_tz::Tz;
use std::io::{self, Write};

const RESULTS_START: &str = r#"<ul class="result-list">"#;
const RESULTS_END: &str = "</ul>";

const OFFER_START: &str = "<a href=";
const OFFER_END: &str = "</a>";

// Fragments start with `<a href="`.
const URL_OFFSET: usize = 9;

const DESCRIPTION: Field = Field::new("<em>Stellenbezeichnung</em>", "</h3>");
const EMPLOYER: Field = Field::new("<em>Arbeitgeber</em>", "</p>");
const DEADLINE: Field = Field::new("<em>Bewerbungsfrist</em>", "</p>");

const DATE_FORMAT: &str = "%d.%m.%y";
const CENTURY_SPLIT: i32 = 69;

const NEXT: &str = r#"class="next""#;
const NEXT_END: &str = "</li>";
const NEXT_HREF: Field = Field::new(r#"<a href=""#, "\"");

#[derive(Debug, Clone)]
pub struct BundCrawler {
    base_url: String,
    tz: Tz,
}

impl BundCrawler {
    pub fn new(base_url: impl Into<String>, tz: Tz) -> Self {
        BundCrawler {
            base_url: base_url.into(),
            tz,
        }
    }

    /// Parses a job offer out of one `<a href="...">...</a>` fragment:
    ///
    /// ```text
    /// <a href="IMPORTE/Stellenangebote/.../3380505.html;jsessionid=...?nn=4642046&amp;type=0"
    ///    title="Zur Detailseite '...'">
    ///   <div aria-labelledby="title">
    ///     <h3><em>Stellenbezeichnung</em> Soft­wa­re­ent­wick­ler/-in­nen (m/w/d) </h3>
    ///     <p><em>Arbeitgeber</em> Uni­ver­si­täts­bi­blio­thek ... </p>
    ///   </div>
    ///   <div aria-labelledby="date"><p><em>Veröffentlicht</em> 09.04.20</p></div>
    ///   <div aria-labelledby="location"><p><em>Bewerbungsfrist</em> 07.05.20</p></div>
    /// ```
    pub fn parse_job_offer(&self, s: &str) -> Result<JobOffer, ExtractionError> {
        let url = s
            .get(URL_OFFSET..)
            .and_then(|rest| rest.find(|c| matches!(c, ';' | '"')).map(|end| &rest[..end]))
            .ok_or(ExtractionError::UrlTerminatorNotFound)?;

        let description = DESCRIPTION.find(s).map_err(|m| match m {
            Missing::Start => ExtractionError::DescriptionMarkerNotFound,
            Missing::End => ExtractionError::DescriptionEndNotFound,
        })?;

        let employer = EMPLOYER.find(s).map_err(|m| match m {
            Missing::Start => ExtractionError::EmployerMarkerNotFound,
            Missing::End => ExtractionError::EmployerEndNotFound,
        })?;

        let deadline = DEADLINE.find(s).map_err(|m| match m {
            Missing::Start => ExtractionError::DeadlineMarkerNotFound,
            Missing::End => ExtractionError::DeadlineEndNotFound,
        })?;

        Ok(JobOffer {
            description: markers::strip_soft_hyphens(markers::trim_markup(description)),
            employer: markers::strip_soft_hyphens(markers::trim_markup(employer)),
            end_date: self.parse_end_date(markers::trim_markup(deadline))?,
            url: url.to_string(),
        })
    }

    /// Deadlines are inclusive, so the date is moved to 23:59:59 of that day.
    pub fn parse_end_date(&self, raw: &str) -> Result<DateTime<Tz>, ExtractionError> {
        let date = NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|source| {
            ExtractionError::InvalidDate {
                raw: raw.to_string(),
                source,
            }
        })?;

        // `%y` splits the century at 70; deadlines use the 69 split.
        let date = if date.year() >= 2000 + CENTURY_SPLIT {
            date.with_year(date.year() - 100)
        } else {
            Some(date)
        };

        let midnight = date
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .and_then(|dt| self.tz.from_local_datetime(&dt).earliest())
            .ok_or_else(|| ExtractionError::NonexistentLocalTime(raw.to_string()))?;

        Ok(midnight + Duration::seconds(23 * 3600 + 59 * 60 + 59))
    }
}

impl Crawler for BundCrawler {
    type Document = JobOffer;

    fn results<'p>(&self, page: &'p str) -> Result<&'p str, CrawlerError> {
        let begin = page.find(RESULTS_START).ok_or(CrawlerError::ResultsNotFound)?;
        let end = find_from(page, RESULTS_END, begin).ok_or(CrawlerError::ResultsEndNotFound)?;
        Ok(&page[begin..end])
    }

    fn fragments<'p>(&self, results: &'p str) -> Fragments<'p> {
        Fragments::new(results, OFFER_START, OFFER_END)
    }

    fn extract(&self, fragment: &str) -> Result<JobOffer, ExtractionError> {
        self.parse_job_offer(fragment)
    }

    fn next_page(&self, page: &str) -> Option<String> {
        let begin = page.find(NEXT)?;
        let end = find_from(page, NEXT_END, begin)?;
        let href = NEXT_HREF.find(&page[begin..end]).ok()?;
        Some(format!("{}{}", self.base_url, href).replace("amp;", ""))
    }

    fn print<W: Write>(&self, out: &mut W, ordinal: u64, doc: &JobOffer) -> io::Result<()> {
        doc.write_entry(out, ordinal, &self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Europe::Berlin;
    use pretty_assertions::assert_eq;
    use std::fs;

    const BASE: &str = "https://www.service.bund.de/";

    fn crawler() -> BundCrawler {
        BundCrawler::new(BASE, Berlin)
    }

    fn fragment() -> String {
        fs::read_to_string("tests/htmls/offer.html").expect("Invalid file path")
    }

    #[test]
    fn test_parsing_job_offer() {
        let offer = crawler().parse_job_offer(&fragment()).unwrap();

        let expected = JobOffer {
            description: "Softwareentwickler/-innen (m/w/d) für Open-Source Software".to_string(),
            employer: "Universitätsbibliothek der Technischen Universität München".to_string(),
            end_date: Berlin.with_ymd_and_hms(2020, 5, 7, 23, 59, 59).unwrap(),
            url: "IMPORTE/Stellenangebote/editor/Technische-Universitaet-Muenchen/2020/04/3380505.html"
                .to_string(),
        };
        assert_eq!(offer, expected);
    }

    #[test]
    fn url_ends_at_quote_without_session_id() {
        let s = fragment().replace(";jsessionid=8A12F82096E6667B7513EFA19A66F93C.2_cid296?nn=4642046&amp;type=0&amp;searchResult=true", "");
        let offer = crawler().parse_job_offer(&s).unwrap();
        assert_eq!(
            offer.url,
            "IMPORTE/Stellenangebote/editor/Technische-Universitaet-Muenchen/2020/04/3380505.html"
        );
    }

    #[test]
    fn missing_markers() {
        let parse = |marker: &str| crawler().parse_job_offer(&fragment().replace(marker, ""));

        assert!(matches!(
            parse("<em>Stellenbezeichnung</em>"),
            Err(ExtractionError::DescriptionMarkerNotFound)
        ));
        assert!(matches!(
            parse("</h3>"),
            Err(ExtractionError::DescriptionEndNotFound)
        ));
        assert!(matches!(
            parse("<em>Arbeitgeber</em>"),
            Err(ExtractionError::EmployerMarkerNotFound)
        ));
        assert!(matches!(
            parse("<em>Bewerbungsfrist</em>"),
            Err(ExtractionError::DeadlineMarkerNotFound)
        ));
    }

    #[test]
    fn missing_end_markers() {
        let s = r#"<a href="x.html"><h3><em>Stellenbezeichnung</em> A</h3><em>Arbeitgeber</em> B"#;
        assert!(matches!(
            crawler().parse_job_offer(s),
            Err(ExtractionError::EmployerEndNotFound)
        ));

        let s = r#"<a href="x.html"><h3><em>Stellenbezeichnung</em> A</h3><p><em>Arbeitgeber</em> B</p><em>Bewerbungsfrist</em> 07.05.20"#;
        assert!(matches!(
            crawler().parse_job_offer(s),
            Err(ExtractionError::DeadlineEndNotFound)
        ));
    }

    #[test]
    fn missing_url_terminator() {
        assert!(matches!(
            crawler().parse_job_offer("<a href=\"no-terminator"),
            Err(ExtractionError::UrlTerminatorNotFound)
        ));
        assert!(matches!(
            crawler().parse_job_offer("<a"),
            Err(ExtractionError::UrlTerminatorNotFound)
        ));
    }

    #[test]
    fn test_end_date() {
        assert_eq!(
            crawler().parse_end_date("07.05.20").unwrap(),
            Berlin.with_ymd_and_hms(2020, 5, 7, 23, 59, 59).unwrap()
        );
        assert_eq!(
            crawler().parse_end_date("24.12.68").unwrap(),
            Berlin.with_ymd_and_hms(2068, 12, 24, 23, 59, 59).unwrap()
        );
        assert_eq!(
            crawler().parse_end_date("01.01.69").unwrap(),
            Berlin.with_ymd_and_hms(1969, 1, 1, 23, 59, 59).unwrap()
        );
        assert_eq!(
            crawler().parse_end_date("31.12.99").unwrap(),
            Berlin.with_ymd_and_hms(1999, 12, 31, 23, 59, 59).unwrap()
        );
        assert_eq!(
            crawler().parse_end_date("29.02.72").unwrap(),
            Berlin.with_ymd_and_hms(1972, 2, 29, 23, 59, 59).unwrap()
        );
    }

    #[test]
    fn test_invalid_end_date() {
        let err = crawler().parse_end_date("31.02.20").unwrap_err();
        assert!(matches!(err, ExtractionError::InvalidDate { ref raw, .. } if raw == "31.02.20"));

        let s = fragment().replace("07.05.20", "demnächst");
        assert!(matches!(
            crawler().parse_job_offer(&s),
            Err(ExtractionError::InvalidDate { .. })
        ));
    }

    #[test]
    fn test_results_region() {
        let c = crawler();
        let page = r#"<body><ul class="nav"></ul><ul class="result-list"><li>x</li></ul></body>"#;
        assert_eq!(c.results(page).unwrap(), r#"<ul class="result-list"><li>x</li>"#);

        assert!(matches!(
            c.results("<body></body>"),
            Err(CrawlerError::ResultsNotFound)
        ));
        assert!(matches!(
            c.results(r#"<ul class="result-list"><li>x</li>"#),
            Err(CrawlerError::ResultsEndNotFound)
        ));
    }

    #[test]
    fn test_next_page() {
        let c = crawler();
        let page = r#"<li class="next"><a href="Content/DE/Stellen/Suche/Formular.html?gtp=4642046_list%253D2&amp;resultsPerPage=100" title="weiter">weiter</a></li>"#;
        assert_eq!(
            c.next_page(page).as_deref(),
            Some("https://www.service.bund.de/Content/DE/Stellen/Suche/Formular.html?gtp=4642046_list%253D2&resultsPerPage=100")
        );
    }

    #[test]
    fn test_no_next_page() {
        let c = crawler();
        assert_eq!(c.next_page(r#"<li class="prev"><a href="x">x</a></li>"#), None);
        assert_eq!(c.next_page(r#"<li class="next"><a href="x">x</a>"#), None);
        assert_eq!(c.next_page(r#"<li class="next"><span>weiter</span></li>"#), None);
        assert_eq!(c.next_page(r#"<li class="next"><a href="x</li>"#), None);
    }
}
