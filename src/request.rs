use crate::header::HeaderMap;

/// A single parsed HTTP/1.1 request. Constructed once from the first read
/// off a connection and immutable afterwards. Bodies are not supported:
/// parsing stops at the blank line ending the header section.
#[derive(Debug)]
pub struct Request {
    method: String,
    path: String,
    version: String,
    headers: HeaderMap,
}

impl Request {
    /// Parses a request from the raw bytes of a single read. The buffer is
    /// split on CRLF; line 0 must be a `method SP path SP version` request
    /// line, followed by `Name: value` lines up to the first empty line.
    /// Anything after the empty line is ignored.
    pub fn try_parse(buf: &[u8]) -> Result<Self, ParseError> {
        let mut lines = split_crlf(buf);

        let request_line = lines.next().ok_or(ParseError("empty request"))?;
        let request_line = std::str::from_utf8(request_line)
            .map_err(|_| ParseError("request line is not utf-8"))?;
        let mut fields = request_line.split(' ');
        let method = fields.next().ok_or(ParseError("expected HTTP method"))?;
        let path = fields.next().ok_or(ParseError("expected path"))?;
        let version = fields.next().ok_or(ParseError("expected HTTP version"))?;
        if fields.next().is_some() {
            return Err(ParseError("too many fields in request line"));
        }
        if method.is_empty() || path.is_empty() || version.is_empty() {
            return Err(ParseError("empty field in request line"));
        }

        let mut headers = HeaderMap::new();
        for line in lines {
            if line.is_empty() {
                break;
            }
            let line =
                std::str::from_utf8(line).map_err(|_| ParseError("header line is not utf-8"))?;
            let (name, value) = line
                .split_once(':')
                .ok_or(ParseError("expected HTTP header"))?;
            headers.add(name.trim_matches(' '), value.trim_matches(' '));
        }

        Ok(Self {
            method: method.to_owned(),
            path: path.to_owned(),
            version: version.to_owned(),
            headers,
        })
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

fn split_crlf(buf: &[u8]) -> impl Iterator<Item = &[u8]> {
    // a trailing fragment without its own CRLF is still yielded
    let mut rest = Some(buf);
    std::iter::from_fn(move || {
        let buf = rest?;
        match buf.windows(2).position(|w| w == b"\r\n") {
            Some(i) => {
                rest = Some(&buf[i + 2..]);
                Some(&buf[..i])
            }
            None => {
                rest = None;
                if buf.is_empty() {
                    None
                } else {
                    Some(buf)
                }
            }
        }
    })
}

#[derive(Clone, Copy, Debug)]
pub struct ParseError(&'static str);

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_request_line() {
        let req = Request::try_parse(b"GET / HTTP/1.1\r\n\r\n").unwrap();
        assert_eq!(req.method(), "GET");
        assert_eq!(req.path(), "/");
        assert_eq!(req.version(), "HTTP/1.1");
        assert!(req.headers().is_empty());
    }

    #[test]
    fn parses_headers_with_any_casing() {
        let req = Request::try_parse(
            b"GET /user-agent HTTP/1.1\r\nuser-agent: test-client/1.0\r\nHOST:  localhost \r\n\r\n",
        )
        .unwrap();
        assert_eq!(req.headers().get("User-Agent"), Some("test-client/1.0"));
        assert_eq!(req.headers().get("host"), Some("localhost"));
        assert_eq!(req.headers().len(), 2);
    }

    #[test]
    fn ignores_lines_after_blank_line() {
        let req =
            Request::try_parse(b"POST /echo/hi HTTP/1.1\r\nHost: x\r\n\r\nnot-a-header-line")
                .unwrap();
        assert_eq!(req.headers().len(), 1);
        assert_eq!(req.headers().get("not-a-header-line"), None);
    }

    #[test]
    fn short_request_line_is_an_error() {
        assert!(Request::try_parse(b"GET /\r\n\r\n").is_err());
        assert!(Request::try_parse(b"GET\r\n\r\n").is_err());
        assert!(Request::try_parse(b"\r\n\r\n").is_err());
        assert!(Request::try_parse(b"").is_err());
    }

    #[test]
    fn header_line_without_colon_is_an_error() {
        let result = Request::try_parse(b"GET / HTTP/1.1\r\nnot a header\r\n\r\n");
        assert!(result.is_err());
    }

    #[test]
    fn trailing_nul_padding_is_tolerated() {
        // a fixed-size read buffer hands the parser trailing zeroes
        let mut buf = b"GET / HTTP/1.1\r\n\r\n".to_vec();
        buf.resize(64, 0);
        let req = Request::try_parse(&buf).unwrap();
        assert_eq!(req.path(), "/");
    }
}
