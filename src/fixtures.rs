#[cfg(test)]
pub mod test {
    use std::io;
    use std::sync::{Arc, Mutex};

    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
    pub struct Scalars {
        pub text: String,
        pub count: i64,
        pub ratio: f64,
        pub enabled: bool,
    }

    crate::bind! {
        Scalars {
            text => [env = "TEST_STRING", flag = "test-string"],
            count => [env = "TEST_INT", flag = "test-int"],
            ratio => [env = "TEST_FLOAT", flag = "test-float"],
            enabled => [env = "TEST_BOOLEAN", flag = "test-boolean"],
        }
    }

    #[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
    pub struct Inner {
        pub field: String,
    }

    crate::bind! {
        Inner {
            field => [env = "TEST_NESTED", flag = "test-nested"],
        }
    }

    /// Two nested records and no tagged fields of its own.
    #[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
    pub struct Outer {
        pub scalars: Scalars,
        pub inner: Inner,
    }

    crate::bind! {
        Outer {
            scalars => nested,
            inner => nested,
        }
    }

    #[derive(Debug, Default, PartialEq)]
    pub struct ListConfig {
        pub hosts: Vec<String>,
        pub ports: Vec<u16>,
        pub skipped: String,
    }

    crate::bind! {
        ListConfig {
            hosts => [env = "HOSTS"],
            ports => [env = "PORTS"],
            skipped => [env = "-"],
        }
    }

    #[derive(Debug, Default, PartialEq)]
    pub struct Narrow {
        pub small: u8,
    }

    crate::bind! {
        Narrow {
            small => [env = "TEST_INT"],
        }
    }

    /// Shaped like a typical service config: one field per source plus a
    /// field every source can set.
    #[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
    pub struct ServiceConfig {
        pub name: String,
        pub port: u16,
        pub debug: bool,
        pub tags: Vec<String>,
        pub database: DbConfig,
    }

    impl Default for ServiceConfig {
        fn default() -> Self {
            Self {
                name: "service".into(),
                port: 8080,
                debug: false,
                tags: Vec::new(),
                database: DbConfig::default(),
            }
        }
    }

    crate::bind! {
        ServiceConfig {
            name => [env = "SERVICE_NAME"],
            port => [env = "PORT", flag = "port"],
            debug => [flag = "debug"],
            tags => [env = "TAGS", flag = "tag"],
            database => nested,
        }
    }

    #[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
    pub struct DbConfig {
        pub url: Option<String>,
        pub pool_size: u32,
    }

    impl Default for DbConfig {
        fn default() -> Self {
            Self {
                url: None,
                pool_size: 5,
            }
        }
    }

    crate::bind! {
        DbConfig {
            url => [env = "DATABASE_URL", flag = "database-url"],
            pool_size => [env = "DATABASE_POOL_SIZE"],
        }
    }

    /// In-memory sink for a test-local `tracing` subscriber.
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Run `f` with a subscriber installed on this thread and return
    /// everything it logged, without ANSI colors.
    pub fn capture_logs(f: impl FnOnce()) -> String {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::TRACE)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = buffer.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn capture_logs_sees_events() {
        let logs = capture_logs(|| tracing::warn!(key = "abc", "something odd"));
        assert!(logs.contains("WARN"));
        assert!(logs.contains("something odd"));
        assert!(logs.contains("key=\"abc\""));
    }

    #[test]
    fn service_config_defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.name, "service");
        assert_eq!(config.port, 8080);
        assert!(!config.debug);
        assert_eq!(config.database.url, None);
        assert_eq!(config.database.pool_size, 5);
    }
}
