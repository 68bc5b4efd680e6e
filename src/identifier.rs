use std::collections::HashMap;
use std::fmt;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

/// NCI/CADD Chemical Identifier Resolver endpoint.
pub const CIR_BASE_URL: &str = "https://cactus.nci.nih.gov/chemical/structure";

/// A CAS registry number such as `64-17-5`.
///
/// Construction checks the shape and the check digit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CasNumber(String);

impl CasNumber {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether `s` has the shape of a registry number (`NNNNNNN-NN-N`,
    /// first part 2 to 7 digits without a leading zero). The check digit is
    /// not verified here.
    pub fn looks_like(s: &str) -> bool {
        let parts: Vec<&str> = s.split('-').collect();
        let [head, mid, check] = *parts.as_slice() else {
            return false;
        };
        let all_digits = |p: &str| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit());
        all_digits(head)
            && (2..=7).contains(&head.len())
            && !head.starts_with('0')
            && all_digits(mid)
            && mid.len() == 2
            && all_digits(check)
            && check.len() == 1
    }

    /// Digits right to left, excluding the check digit, weighted 1, 2, 3...;
    /// the sum mod 10 is the check digit.
    fn expected_check_digit(&self) -> u32 {
        let digits: Vec<u32> = self.0.chars().filter_map(|c| c.to_digit(10)).collect();
        let body = &digits[..digits.len().saturating_sub(1)];
        body.iter()
            .rev()
            .enumerate()
            .map(|(i, d)| (i as u32 + 1) * d)
            .sum::<u32>()
            % 10
    }

    fn check_digit(&self) -> u32 {
        self.0
            .chars()
            .last()
            .and_then(|c| c.to_digit(10))
            .unwrap_or(u32::MAX)
    }
}

impl FromStr for CasNumber {
    type Err = ResolutionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if !Self::looks_like(s) {
            return Err(ResolutionError::Malformed(s.to_string()));
        }
        let cas = CasNumber(s.to_string());
        let expected = cas.expected_check_digit();
        if cas.check_digit() != expected {
            return Err(ResolutionError::CheckDigit {
                cas: s.to_string(),
                expected,
            });
        }
        Ok(cas)
    }
}

impl fmt::Display for CasNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("'{0}' is not a CAS registry number")]
    Malformed(String),
    #[error("CAS number {cas} fails its check digit (expected {expected})")]
    CheckDigit { cas: String, expected: u32 },
    #[error("CAS number {0} is not in the alias table")]
    Unknown(CasNumber),
    #[error("no resolver configured for CAS number {0}")]
    NoResolver(CasNumber),
    #[error("CAS number {0} is not known to the structure resolver")]
    NotFound(CasNumber),
    #[error("request to '{url}' failed: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("CSV parsing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
}

/// What the user typed: a registry number to resolve, or SMILES to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identifier {
    Cas(CasNumber),
    Smiles(String),
}

impl Identifier {
    pub fn parse(input: &str) -> Result<Self, ResolutionError> {
        let input = input.trim();
        if CasNumber::looks_like(input) {
            debug!(input, "input is a CAS number");
            Ok(Identifier::Cas(input.parse()?))
        } else {
            debug!(input, "input is a SMILES string");
            Ok(Identifier::Smiles(input.to_string()))
        }
    }
}

/// Maps registry numbers to SMILES.
pub trait Resolver {
    fn resolve(&self, cas: &CasNumber) -> Result<String, ResolutionError>;
}

/// Resolver that refuses everything, for runs without an alias table.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoResolver;

impl Resolver for NoResolver {
    fn resolve(&self, cas: &CasNumber) -> Result<String, ResolutionError> {
        Err(ResolutionError::NoResolver(cas.clone()))
    }
}

#[derive(Debug, Deserialize)]
struct AliasRow {
    cas: String,
    smiles: String,
}

/// Offline resolver backed by a `cas,smiles` CSV file.
#[derive(Debug, Clone, Default)]
pub struct TableResolver {
    aliases: HashMap<String, String>,
}

impl TableResolver {
    pub fn from_path(path: &Path) -> Result<Self, ResolutionError> {
        let label = path.to_string_lossy().to_string();
        let file = std::fs::File::open(path).map_err(|e| ResolutionError::Io {
            path: label.clone(),
            source: e,
        })?;
        Self::from_reader(file, &label)
    }

    pub fn from_reader<R: Read>(reader: R, label: &str) -> Result<Self, ResolutionError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut aliases = HashMap::new();
        for result in reader.deserialize::<AliasRow>() {
            let row = result.map_err(|e| ResolutionError::Csv {
                path: label.to_string(),
                source: e,
            })?;
            aliases.insert(row.cas, row.smiles);
        }
        Ok(Self { aliases })
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

impl Resolver for TableResolver {
    fn resolve(&self, cas: &CasNumber) -> Result<String, ResolutionError> {
        self.aliases
            .get(cas.as_str())
            .cloned()
            .ok_or_else(|| ResolutionError::Unknown(cas.clone()))
    }
}

/// Online resolver backed by the Chemical Identifier Resolver web service.
#[derive(Debug, Clone)]
pub struct CirResolver {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl CirResolver {
    pub fn new() -> Result<Self, ResolutionError> {
        Self::with_base_url(CIR_BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self, ResolutionError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("viscogroups/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| ResolutionError::Http {
                url: base_url.to_string(),
                source,
            })?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::blocking::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn url_for(&self, cas: &CasNumber) -> String {
        format!("{}/{}/smiles", self.base_url, cas)
    }
}

impl Resolver for CirResolver {
    fn resolve(&self, cas: &CasNumber) -> Result<String, ResolutionError> {
        let url = self.url_for(cas);
        debug!(%url, "querying structure resolver");
        let http = |source: reqwest::Error| ResolutionError::Http {
            url: url.clone(),
            source,
        };
        let response = self.client.get(&url).send().map_err(http)?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ResolutionError::NotFound(cas.clone()));
        }
        let body = response.error_for_status().map_err(http)?.text().map_err(http)?;
        // Several structures can come back, one per line; the first is taken.
        body.lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(str::to_string)
            .ok_or_else(|| ResolutionError::NotFound(cas.clone()))
    }
}

/// Tries each resolver in turn and returns the first answer.
#[derive(Default)]
pub struct ChainResolver {
    resolvers: Vec<Box<dyn Resolver + Send + Sync>>,
}

impl ChainResolver {
    pub fn push<R: Resolver + Send + Sync + 'static>(&mut self, resolver: R) {
        self.resolvers.push(Box::new(resolver));
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }
}

impl Resolver for ChainResolver {
    /// On failure the error from the last resolver is returned.
    fn resolve(&self, cas: &CasNumber) -> Result<String, ResolutionError> {
        let mut last = ResolutionError::NoResolver(cas.clone());
        for resolver in &self.resolvers {
            match resolver.resolve(cas) {
                Ok(smiles) => return Ok(smiles),
                Err(e) => {
                    warn!(%cas, error = %e, "resolver failed, trying the next one");
                    last = e;
                }
            }
        }
        Err(last)
    }
}

impl fmt::Debug for ChainResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainResolver")
            .field("resolvers", &self.resolvers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    #[test]
    fn recognizes_registry_numbers() {
        assert!(CasNumber::looks_like("64-17-5"));
        assert!(CasNumber::looks_like("7732-18-5"));
        assert!(CasNumber::looks_like("1234567-89-0"));
        assert!(!CasNumber::looks_like("012-34-5"));
        assert!(!CasNumber::looks_like("6-17-5"));
        assert!(!CasNumber::looks_like("64-1-5"));
        assert!(!CasNumber::looks_like("64-17-55"));
        assert!(!CasNumber::looks_like("CCO"));
        assert!(!CasNumber::looks_like("C-C-C"));
    }

    #[test]
    fn check_digit_is_validated() {
        assert!("64-17-5".parse::<CasNumber>().is_ok());
        assert!("7732-18-5".parse::<CasNumber>().is_ok());
        assert!("71-43-2".parse::<CasNumber>().is_ok());
        let err = "64-17-6".parse::<CasNumber>().unwrap_err();
        assert!(matches!(err, ResolutionError::CheckDigit { expected: 5, .. }));
    }

    #[test]
    fn identifier_classification() {
        assert_eq!(
            Identifier::parse(" 64-17-5 ").unwrap(),
            Identifier::Cas(CasNumber("64-17-5".into()))
        );
        assert_eq!(
            Identifier::parse("CCO").unwrap(),
            Identifier::Smiles("CCO".into())
        );
        assert!(Identifier::parse("64-17-4").is_err());
    }

    #[test]
    fn table_resolver_looks_up_aliases() {
        let csv = "cas,smiles\n64-17-5, CCO\n71-43-2,c1ccccc1\n";
        let resolver = TableResolver::from_reader(csv.as_bytes(), "aliases").unwrap();
        assert_eq!(resolver.len(), 2);
        let ethanol: CasNumber = "64-17-5".parse().unwrap();
        assert_eq!(resolver.resolve(&ethanol).unwrap(), "CCO");
        let water: CasNumber = "7732-18-5".parse().unwrap();
        assert!(matches!(resolver.resolve(&water), Err(ResolutionError::Unknown(_))));
    }

    #[test]
    fn no_resolver_refuses() {
        let cas: CasNumber = "64-17-5".parse().unwrap();
        assert!(matches!(NoResolver.resolve(&cas), Err(ResolutionError::NoResolver(_))));
    }

    /// Answers one HTTP request with a canned response and hands back the
    /// request head it saw.
    fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            write!(
                stream,
                "HTTP/1.1 {status}\r\nContent-Type: text/plain\r\n\
                 Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            )
            .unwrap();
            String::from_utf8_lossy(&request).into_owned()
        });
        (format!("http://{addr}/chemical/structure/"), handle)
    }

    fn local_resolver(base_url: &str) -> CirResolver {
        let client = reqwest::blocking::Client::builder().no_proxy().build().unwrap();
        CirResolver::with_client(client, base_url)
    }

    #[test]
    fn cir_resolver_requests_smiles_for_the_number() {
        let (base, server) = serve_once("200 OK", "CCO\n");
        let resolver = local_resolver(&base);
        let ethanol: CasNumber = "64-17-5".parse().unwrap();
        assert_eq!(resolver.resolve(&ethanol).unwrap(), "CCO");
        let request = server.join().unwrap();
        assert!(
            request.starts_with("GET /chemical/structure/64-17-5/smiles HTTP/1.1"),
            "{request}"
        );
    }

    #[test]
    fn cir_resolver_takes_the_first_of_several_answers() {
        let (base, server) = serve_once("200 OK", "\nC1CCCCC1\nc1ccccc1\n");
        let cas: CasNumber = "110-82-7".parse().unwrap();
        assert_eq!(local_resolver(&base).resolve(&cas).unwrap(), "C1CCCCC1");
        server.join().unwrap();
    }

    #[test]
    fn cir_not_found_is_its_own_error() {
        let (base, server) = serve_once("404 Not Found", "Page not found (404)");
        let cas: CasNumber = "7732-18-5".parse().unwrap();
        let err = local_resolver(&base).resolve(&cas).unwrap_err();
        assert!(matches!(err, ResolutionError::NotFound(_)), "{err}");
        server.join().unwrap();
    }

    #[test]
    fn cir_server_errors_are_http_errors() {
        let (base, server) = serve_once("500 Internal Server Error", "");
        let cas: CasNumber = "64-17-5".parse().unwrap();
        let err = local_resolver(&base).resolve(&cas).unwrap_err();
        assert!(
            matches!(&err, ResolutionError::Http { url, .. } if url.ends_with("/64-17-5/smiles")),
            "{err}"
        );
        server.join().unwrap();
    }

    #[test]
    fn cir_unreachable_host_is_an_http_error() {
        let addr = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
        let cas: CasNumber = "64-17-5".parse().unwrap();
        let err = local_resolver(&format!("http://{addr}")).resolve(&cas).unwrap_err();
        assert!(matches!(err, ResolutionError::Http { .. }));
    }

    #[test]
    fn chain_falls_through_to_the_next_resolver() {
        let ethanol: CasNumber = "64-17-5".parse().unwrap();
        let mut chain = ChainResolver::default();
        assert!(matches!(chain.resolve(&ethanol), Err(ResolutionError::NoResolver(_))));

        let benzene = "cas,smiles\n71-43-2,c1ccccc1\n";
        chain.push(TableResolver::from_reader(benzene.as_bytes(), "a").unwrap());
        assert!(matches!(chain.resolve(&ethanol), Err(ResolutionError::Unknown(_))));

        let ethanol_row = "cas,smiles\n64-17-5,CCO\n";
        chain.push(TableResolver::from_reader(ethanol_row.as_bytes(), "b").unwrap());
        assert_eq!(chain.len(), 2);
        assert_eq!(chain.resolve(&ethanol).unwrap(), "CCO");
    }
}
