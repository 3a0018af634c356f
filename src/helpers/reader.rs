use crate::html::HtmlError;
use encoding_rs::Encoding;
use std::fs::File;
use std::io::BufReader;
use std::io::Cursor;
use std::io::Read;
use std::path::PathBuf;
use url::ParseError;
use url::Url;

/// Where an HTML document lives.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Location {
    /// Path on the local filesystem (bare path or `file:` URL)
    Local(PathBuf),
    /// Any URL whose scheme is not `file`
    Remote(Url),
}

impl TryFrom<&str> for Location {
    type Error = HtmlError;

    /// Resolves a location string.
    /// Strings without a scheme are local paths, `file:` URLs are converted to paths,
    /// and everything else is fetched remotely.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let value = value.trim();
        if value.is_empty() {
            return Err(HtmlError::InvalidLocation(value.to_owned()));
        }
        match Url::parse(value) {
            Ok(url) if url.scheme() == "file" => url
                .to_file_path()
                .map(Location::Local)
                .map_err(|_| HtmlError::InvalidLocation(value.to_owned())),
            // Single letter schemes are Windows drive letters
            Ok(url) if url.scheme().len() == 1 => Ok(Location::Local(PathBuf::from(value))),
            Ok(url) => Ok(Location::Remote(url)),
            Err(ParseError::RelativeUrlWithoutBase) => Ok(Location::Local(PathBuf::from(value))),
            Err(_) => Err(HtmlError::InvalidLocation(value.to_owned())),
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Location::Local(path) => write!(f, "{}", path.display()),
            Location::Remote(url) => write!(f, "{url}"),
        }
    }
}

/// A unified reader that can handle both local files and remote URLs
pub(crate) enum UnifiedReader {
    /// Local file reader
    Local(BufReader<File>),
    /// Remote URL reader (in-memory buffer)
    Remote(Cursor<Vec<u8>>),
}

impl UnifiedReader {
    /// Opens a document from either a local path or remote URL.
    /// Remote URLs go through DuckDB's read_blob, which handles http, https, s3 and
    /// friends together with their credentials.
    pub(crate) fn new(location: &Location) -> Result<UnifiedReader, HtmlError> {
        let fetch_error = |source: Box<dyn std::error::Error + Send + Sync>| HtmlError::Fetch {
            location: location.to_string(),
            source,
        };
        match location {
            Location::Local(path) => {
                let file = File::open(path).map_err(|e| fetch_error(e.into()))?;
                Ok(UnifiedReader::Local(BufReader::new(file)))
            }
            Location::Remote(url) => {
                Self::read_blob_with_duckdb(url.as_str()).map_err(|e| fetch_error(e.into()))
            }
        }
    }

    /// Reads a remote document using DuckDB's read_blob functionality
    fn read_blob_with_duckdb(url: &str) -> Result<UnifiedReader, duckdb::Error> {
        let connection = duckdb::Connection::open_in_memory()?;
        let result: Result<Vec<u8>, _> = connection.query_row("SELECT content FROM read_blob(?)", [url], |row| row.get(0));
        connection.close().map_err(|(_, e)| e)?;
        Ok(UnifiedReader::Remote(Cursor::new(result?)))
    }

    /// Reads the whole document and decodes it.
    /// A byte order mark overrides `encoding`; malformed sequences become U+FFFD.
    pub(crate) fn read_to_text(mut self, location: &Location, encoding: &'static Encoding) -> Result<String, HtmlError> {
        let mut bytes = Vec::new();
        self.read_to_end(&mut bytes).map_err(|e| HtmlError::Fetch {
            location: location.to_string(),
            source: e.into(),
        })?;
        let (text, used, had_errors) = encoding.decode(&bytes);
        tracing::trace!(%location, bytes = bytes.len(), encoding = used.name(), had_errors, "decoded document");
        Ok(text.into_owned())
    }
}

impl Read for UnifiedReader {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match self {
            UnifiedReader::Local(reader) => reader.read(buf),
            UnifiedReader::Remote(reader) => reader.read(buf),
        }
    }
}
