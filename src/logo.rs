//! Logo fallback chain for distribution cards.
//!
//! A presenter tries each source in order and moves on only when the previous
//! one fails to load. The initials placeholder always renders.

use smallvec::SmallVec;

use crate::data::DistroRecord;

/// Logo-by-domain service used when a record has no logo of its own.
const DOMAIN_LOGO_SERVICE: &str = "https://logo.clearbit.com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoSource {
    /// Logo URL published with the record.
    Record(String),
    /// Logo derived from the website host.
    Domain(String),
    /// Text placeholder.
    Initials(String),
}

/// Logo sources for a record, most specific first.
pub fn logo_sources(record: &DistroRecord) -> SmallVec<[LogoSource; 3]> {
    let mut sources = SmallVec::new();

    if let Some(logo) = record.logo.as_deref().map(str::trim).filter(|l| !l.is_empty()) {
        sources.push(LogoSource::Record(logo.to_owned()));
    }
    if let Some(host) = record.website.as_deref().and_then(website_host) {
        sources.push(LogoSource::Domain(format!("{DOMAIN_LOGO_SERVICE}/{host}")));
    }
    sources.push(LogoSource::Initials(initials(record)));

    sources
}

/// Host of a website URL without a leading `www.`.
fn website_host(url: &str) -> Option<&str> {
    let rest = url.trim();
    let rest = rest.split_once("://").map_or(rest, |(_, rest)| rest);
    let authority = rest.split(['/', '?', '#']).next()?;
    let host = authority.rsplit('@').next()?;
    let host = host.split(':').next()?;
    let host = host.strip_prefix("www.").unwrap_or(host);

    (!host.is_empty() && host.contains('.')).then_some(host)
}

/// First letters of the first two words of the name, or the start of the id.
fn initials(record: &DistroRecord) -> String {
    let from_name: String = record
        .name
        .split_whitespace()
        .take(2)
        .filter_map(|word| word.chars().next())
        .collect();

    let letters = if from_name.is_empty() {
        record.id.chars().take(2).collect()
    } else {
        from_name
    };
    letters.to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_chain() {
        let mut record = DistroRecord::new("mint", "Linux Mint Cinnamon");
        record.logo = Some("https://cdn.example/mint.svg".into());
        record.website = Some("https://www.linuxmint.com/download.php".into());

        assert_eq!(
            logo_sources(&record).as_slice(),
            [
                LogoSource::Record("https://cdn.example/mint.svg".into()),
                LogoSource::Domain("https://logo.clearbit.com/linuxmint.com".into()),
                LogoSource::Initials("LM".into()),
            ]
        );
    }

    #[test]
    fn test_initials_only() {
        let mut record = DistroRecord::new("void", "void");
        record.logo = Some("  ".into());
        record.website = Some("not a url".into());

        assert_eq!(
            logo_sources(&record).as_slice(),
            [LogoSource::Initials("V".into())]
        );
    }

    #[test]
    fn test_initials_fall_back_to_id() {
        let record = DistroRecord::new("nixos", "");
        assert_eq!(initials(&record), "NI");
    }

    #[test]
    fn test_website_host() {
        assert_eq!(website_host("https://archlinux.org"), Some("archlinux.org"));
        assert_eq!(website_host("http://www.debian.org:80/path?q#f"), Some("debian.org"));
        assert_eq!(website_host("fedoraproject.org/workstation"), Some("fedoraproject.org"));
        assert_eq!(website_host(""), None);
    }
}
