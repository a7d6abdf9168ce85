//! Flags de la linea de comandos y descriptor de conexion.

use crate::DEFAULT_PORT;

use clap::{CommandFactory, Parser};
use std::fmt;

/// Variable de entorno utilizada cuando `-password` esta vacio.
pub const PASSWORD_ENV: &str = "REDIS_PASSWORD";

#[derive(Parser, Debug)]
#[clap(
    name = "redish",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Cli {
    /// Output this help and exit.
    #[clap(long)]
    pub help: bool,

    /// Output version and exit.
    #[clap(long)]
    pub version: bool,

    /// Redis server URI
    #[clap(long, default_value = "localhost:6379")]
    pub uri: String,

    /// Establish a secure TLS connection.
    #[clap(long)]
    pub tls: bool,

    /// Allow insecure TLS connection by skipping cert validation.
    #[clap(long)]
    pub insecure: bool,

    /// Log level (debug, info, warn, error, fatal, panic)
    #[clap(long = "logLevel", default_value = "warn")]
    pub log_level: String,

    /// Username to use when connecting. Supported since Redis 6.
    #[clap(long)]
    pub user: Option<String>,

    /// Password to use when connecting or empty and use the REDIS_PASSWORD environment variable
    #[clap(long)]
    pub password: Option<String>,

    /// Redis database to access
    #[clap(long, default_value_t = 0)]
    pub db: i64,

    /// Redis commands to execute
    #[clap(long)]
    pub commands: Option<String>,
}

impl Cli {
    /// Parsea los argumentos del proceso aceptando flags con un solo guion.
    ///
    /// Si los argumentos no son validos clap imprime el error y termina el
    /// proceso.
    pub fn parse_args<I>(args: I) -> Cli
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Cli::parse_from(normalize_args(args))
    }

    /// Igual que `parse_args` pero retornando el error en lugar de terminar.
    pub fn try_parse_args<I>(args: I) -> Result<Cli, clap::Error>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Cli::try_parse_from(normalize_args(args))
    }

    /// El batch de comandos, si se ha indicado uno no vacio.
    pub fn batch(&self) -> Option<&str> {
        self.commands.as_deref().filter(|s| !s.is_empty())
    }
}

/// Reescribe los flags largos con un solo guion (`-uri`, `-logLevel=debug`)
/// a la forma `--uri` que entiende clap.
///
/// El primer elemento es el nombre del programa y no se toca. Despues de
/// `--` ya no se reescribe nada. Los numeros negativos (`-1`) y los flags
/// de una sola letra se dejan igual.
pub fn normalize_args<I>(args: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    let mut out = Vec::new();
    let mut rewrite = true;

    for (i, arg) in args.into_iter().enumerate() {
        let arg: String = arg.into();

        if i == 0 || !rewrite {
            out.push(arg);
            continue;
        }

        if arg == "--" {
            rewrite = false;
            out.push(arg);
            continue;
        }

        let is_single_dash_long = !arg.starts_with("--")
            && arg
                .strip_prefix('-')
                .map(|name| {
                    let name = name.split('=').next().unwrap_or("");
                    name.len() > 1 && name.starts_with(|c: char| c.is_ascii_alphabetic())
                })
                .unwrap_or(false);

        if is_single_dash_long {
            out.push(format!("-{}", arg));
        } else {
            out.push(arg);
        }
    }

    out
}

/// Texto de ayuda de `-help`.
///
/// Los flags se muestran con un solo guion (`-uri`), que es como se
/// documentan y como los acepta `normalize_args`.
pub fn usage() -> String {
    let mut help = Vec::new();
    // Escribir en un `Vec<u8>` no puede fallar.
    let _ = Cli::command().write_help(&mut help);

    format!(
        "Usage of Redish - the redis-cli:\n{}",
        single_dash(&String::from_utf8_lossy(&help))
    )
}

/// Cambia `--flag` por `-flag` en el texto de ayuda.
fn single_dash(help: &str) -> String {
    let mut out = String::with_capacity(help.len());
    let mut rest = help;

    while let Some(pos) = rest.find("--") {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 2..];
        let at_word_start = out
            .chars()
            .last()
            .map_or(true, |c| !c.is_ascii_alphanumeric() && c != '-');

        if at_word_start && after.starts_with(|c: char| c.is_ascii_alphabetic()) {
            out.push('-');
        } else {
            out.push_str("--");
        }
        rest = after;
    }

    out.push_str(rest);
    out
}

/// Linea de `-version`.
pub fn version_line() -> String {
    format!(
        "Redish - the redis-cli - version: {}",
        env!("CARGO_PKG_VERSION")
    )
}

/// Opciones TLS. Solo existen si TLS esta activado.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TlsSettings {
    /// No se valida el certificado del servidor.
    pub insecure: bool,
}

/// Todo lo necesario para conectar con el servidor.
///
/// Se construye una unica vez al arrancar y no cambia durante la vida del
/// proceso.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionDescriptor {
    pub host: String,
    pub port: u16,
    pub db: i64,
    pub username: Option<String>,
    pub password: Option<String>,
    pub tls: Option<TlsSettings>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// La direccion no tiene la forma `host:port`.
    InvalidUri(String),

    /// El puerto no es un numero valido.
    InvalidPort(String),
}

impl ConnectionDescriptor {
    /// Construye el descriptor a partir de los flags.
    ///
    /// `env` resuelve variables de entorno; en produccion se pasa
    /// `|key| std::env::var(key).ok()`.
    pub fn from_cli<F>(cli: &Cli, env: F) -> Result<ConnectionDescriptor, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let (host, port) = split_address(&cli.uri)?;

        let password = non_empty(cli.password.clone()).or_else(|| non_empty(env(PASSWORD_ENV)));

        let tls = if cli.tls {
            Some(TlsSettings {
                insecure: cli.insecure,
            })
        } else {
            None
        };

        Ok(ConnectionDescriptor {
            host,
            port,
            db: cli.db,
            username: non_empty(cli.user.clone()),
            password,
            tls,
        })
    }

    /// Convierte el descriptor en la informacion de conexion del crate
    /// `redis`.
    pub fn to_connection_info(&self) -> redis::ConnectionInfo {
        let addr = match self.tls {
            Some(tls) => redis::ConnectionAddr::TcpTls {
                host: self.host.clone(),
                port: self.port,
                insecure: tls.insecure,
                tls_params: None,
            },
            None => redis::ConnectionAddr::Tcp(self.host.clone(), self.port),
        };

        redis::ConnectionInfo {
            addr,
            redis: redis::RedisConnectionInfo {
                db: self.db,
                username: self.username.clone(),
                password: self.password.clone(),
                ..Default::default()
            },
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// Separa `host:port`. Sin puerto se usa `DEFAULT_PORT`; un host vacio es
/// `localhost`. Las direcciones IPv6 van entre corchetes.
fn split_address(uri: &str) -> Result<(String, u16), ConfigError> {
    let uri = uri.trim();
    if uri.is_empty() {
        return Err(ConfigError::InvalidUri(uri.to_string()));
    }

    let (host, port) = if let Some(rest) = uri.strip_prefix('[') {
        let (host, tail) = rest
            .split_once(']')
            .ok_or_else(|| ConfigError::InvalidUri(uri.to_string()))?;

        let port = match tail.strip_prefix(':') {
            Some(port) => parse_port(port)?,
            None if tail.is_empty() => DEFAULT_PORT,
            None => return Err(ConfigError::InvalidUri(uri.to_string())),
        };

        (host, port)
    } else {
        match uri.rsplit_once(':') {
            // IPv6 sin corchetes: todo es el host.
            Some((host, _)) if host.contains(':') => (uri, DEFAULT_PORT),
            Some((host, port)) => (host, parse_port(port)?),
            None => (uri, DEFAULT_PORT),
        }
    };

    let host = if host.is_empty() { "localhost" } else { host };

    Ok((host.to_string(), port))
}

fn parse_port(src: &str) -> Result<u16, ConfigError> {
    src.parse::<u16>()
        .map_err(|_| ConfigError::InvalidPort(src.to_string()))
}

impl fmt::Display for ConnectionDescriptor {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        if self.host.contains(':') {
            write!(fmt, "[{}]:{}/{}", self.host, self.port, self.db)?;
        } else {
            write!(fmt, "{}:{}/{}", self.host, self.port, self.db)?;
        }

        if let Some(user) = &self.username {
            write!(fmt, " user={}", user)?;
        }

        match self.tls {
            Some(TlsSettings { insecure: true }) => write!(fmt, " tls=insecure"),
            Some(_) => write!(fmt, " tls"),
            None => Ok(()),
        }
    }
}

impl std::error::Error for ConfigError {}

impl fmt::Display for ConfigError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::InvalidUri(uri) => write!(fmt, "invalid server uri `{}`", uri),
            ConfigError::InvalidPort(port) => write!(fmt, "invalid server port `{}`", port),
        }
    }
}
