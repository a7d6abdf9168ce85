//! Configuracion del log.
//!
//! Las lineas de log van siempre a la salida de error; la salida estandar
//! queda reservada para las respuestas.

use std::fmt;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

/// Niveles aceptados por `-logLevel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
    Panic,
    Disabled,
}

/// El nivel indicado no es ninguno de los conocidos.
#[derive(Debug, PartialEq, Eq)]
pub struct UnknownLevel(pub String);

impl LogLevel {
    /// Resuelve el flag. Si el nivel es desconocido se utiliza `Warn` y se
    /// retorna tambien el valor recibido para poder avisar una vez el log
    /// este instalado.
    pub fn resolve(src: &str) -> (LogLevel, Option<UnknownLevel>) {
        match src.parse() {
            Ok(level) => (level, None),
            Err(unknown) => (LogLevel::Warn, Some(unknown)),
        }
    }

    /// Directiva para `EnvFilter`.
    ///
    /// `tracing` no tiene niveles por encima de `error`, asi que `fatal` y
    /// `panic` se tratan como `error`.
    pub fn directive(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error | LogLevel::Fatal | LogLevel::Panic => "error",
            LogLevel::Disabled => "off",
        }
    }
}

impl FromStr for LogLevel {
    type Err = UnknownLevel;

    fn from_str(src: &str) -> Result<LogLevel, UnknownLevel> {
        let level = match &src.trim().to_lowercase()[..] {
            "trace" => LogLevel::Trace,
            "debug" => LogLevel::Debug,
            "info" => LogLevel::Info,
            "warn" => LogLevel::Warn,
            "error" => LogLevel::Error,
            "fatal" => LogLevel::Fatal,
            "panic" => LogLevel::Panic,
            "disabled" => LogLevel::Disabled,
            _ => return Err(UnknownLevel(src.to_string())),
        };

        Ok(level)
    }
}

impl fmt::Display for UnknownLevel {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "unknown log level `{}`", self.0)
    }
}

impl std::error::Error for UnknownLevel {}

/// Instala el subscriber global con el nivel de `-logLevel`.
///
/// Si no se reconoce el nivel se usa `warn` y se emite un aviso.
pub fn init(log_level: &str) {
    let (level, unknown) = LogLevel::resolve(log_level);

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level.directive()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if let Some(unknown) = unknown {
        tracing::warn!(%unknown, "Invalid log level, defaulting to 'warn'");
    }
}
