use crate::StorageError;
use docstore_config::{ConfigError, FTP_SCHEME};
use docstore_utils::normalize_path;
use percent_encoding::percent_decode_str;
use std::path::Path;
use url::Url;

const DEFAULT_FTP_PORT: u16 = 21;
const PARENT_SEGMENT: &str = "..";

/// Server address plus the base URL every path is joined onto
#[derive(Debug, Clone)]
pub struct FtpEndpoint {
    base: Url,
    host: String,
    port: u16,
}

impl FtpEndpoint {
    pub fn parse(base_url: &str) -> Result<Self, StorageError> {
        let base = Url::parse(base_url)
            .map_err(|e| ConfigError::InvalidConfig(format!("remote.url '{}': {}", base_url, e)))?;
        ensure_ftp_scheme(&base)?;

        let host = base
            .host_str()
            .ok_or_else(|| ConfigError::InvalidConfig(format!("remote.url has no host: {}", base_url)))?
            .to_string();
        let port = base.port().unwrap_or(DEFAULT_FTP_PORT);

        Ok(Self { base, host, port })
    }

    /// `host:port` for the control connection
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Appends `path` to the base URL one percent-encoded segment at a time,
    /// so `#`, `?` and `%` stay part of the file name. A trailing `/` is kept.
    pub fn uri(&self, path: &str) -> Result<Url, StorageError> {
        let normalized = normalize_path(Path::new(path));
        let segments: Vec<&str> = normalized
            .split('/')
            .filter(|s| !s.is_empty() && *s != ".")
            .collect();
        if segments.contains(&PARENT_SEGMENT) {
            return Err(StorageError::InvalidPath(format!("{}: parent segments are not allowed", path)));
        }

        let mut url = self.base.clone();
        {
            let mut target = url
                .path_segments_mut()
                .map_err(|_| StorageError::InvalidPath(format!("{}: base url cannot take a path", self.base)))?;
            target.pop_if_empty().extend(segments);
            if normalized.ends_with('/') {
                target.push("");
            }
        }

        ensure_ftp_scheme(&url)?;
        Ok(url)
    }

    /// Server-side path for `path`, as sent with FTP commands
    pub fn remote_path(&self, path: &str) -> Result<String, StorageError> {
        let url = self.uri(path)?;
        Ok(percent_decode_str(url.path()).decode_utf8_lossy().into_owned())
    }
}

fn ensure_ftp_scheme(url: &Url) -> Result<(), StorageError> {
    if url.scheme() != FTP_SCHEME {
        return Err(ConfigError::InvalidConfig(format!("Url is not an ftp url: {}", url)).into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reads_host_and_port() {
        let endpoint = FtpEndpoint::parse("ftp://ftp.example.com:2121/docs").unwrap();
        assert_eq!(endpoint.address(), "ftp.example.com:2121");

        let endpoint = FtpEndpoint::parse("ftp://ftp.example.com").unwrap();
        assert_eq!(endpoint.address(), "ftp.example.com:21");
    }

    #[test]
    fn test_parse_rejects_other_schemes() {
        for url in ["http://example.com/docs", "file:///tmp/docs"] {
            assert!(matches!(
                FtpEndpoint::parse(url),
                Err(StorageError::ConfigError(_))
            ));
        }
    }

    #[test]
    fn test_uri_joins_with_single_slash() {
        let endpoint = FtpEndpoint::parse("ftp://ftp.example.com/docs/").unwrap();
        assert_eq!(
            endpoint.uri("/reports/a.txt").unwrap().as_str(),
            "ftp://ftp.example.com/docs/reports/a.txt"
        );
        assert_eq!(
            endpoint.uri("reports/a.txt").unwrap().as_str(),
            "ftp://ftp.example.com/docs/reports/a.txt"
        );
    }

    #[test]
    fn test_remote_path() {
        let endpoint = FtpEndpoint::parse("ftp://ftp.example.com/docs").unwrap();
        assert_eq!(endpoint.remote_path("a/b").unwrap(), "/docs/a/b");
        assert_eq!(endpoint.remote_path("a/b/").unwrap(), "/docs/a/b/");
        assert_eq!(endpoint.remote_path("my file.txt").unwrap(), "/docs/my file.txt");

        let root = FtpEndpoint::parse("ftp://ftp.example.com").unwrap();
        assert_eq!(root.remote_path("/x.txt").unwrap(), "/x.txt");
        assert_eq!(root.remote_path("/").unwrap(), "/");
    }

    #[test]
    fn test_reserved_characters_stay_in_file_names() {
        let endpoint = FtpEndpoint::parse("ftp://ftp.example.com/docs").unwrap();

        assert_eq!(endpoint.remote_path("report#1.txt").unwrap(), "/docs/report#1.txt");
        assert_eq!(endpoint.remote_path("what?.txt").unwrap(), "/docs/what?.txt");
        assert_eq!(endpoint.remote_path("a%41.txt").unwrap(), "/docs/a%41.txt");
        assert_eq!(
            endpoint.uri("report#1.txt").unwrap().as_str(),
            "ftp://ftp.example.com/docs/report%231.txt"
        );
    }

    #[test]
    fn test_parent_segments_are_rejected() {
        let endpoint = FtpEndpoint::parse("ftp://ftp.example.com/docs").unwrap();

        for path in ["../../etc/x.txt", "a/../b.txt", "..\\x.txt"] {
            assert!(matches!(
                endpoint.remote_path(path),
                Err(StorageError::InvalidPath(_))
            ));
        }
        assert_eq!(endpoint.remote_path("./a/./b.txt").unwrap(), "/docs/a/b.txt");
    }
}
