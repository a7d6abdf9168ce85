//! Cliente de linea de comandos para servidores compatibles con Redis.
//!
//! Cada comando que escribe el usuario se envia tal cual al servidor y la
//! respuesta decodificada se imprime, un elemento por linea.
//!
//! # Layout
//!
//! Los componentes principales son:
//!
//! * `config`: flags de la linea de comandos y el descriptor de conexion
//!   que se construye a partir de ellos.
//!
//! * `logging`: instalacion del subscriber de `tracing` segun el nivel
//!   indicado en `-logLevel`.
//!
//! * `client` / `blocking_client`: adaptador sobre el crate `redis`. Toda la
//!   gestion del protocolo se delega en ese crate.
//!
//! * `store`: el trait `Store`, la unica capacidad de la que depende el
//!   resto del crate (ping y ejecutar un comando).
//!
//! * `cmd`: el dispatcher que tokeniza una linea y la envia al `Store`.
//!
//! * `reply` / `render`: representacion de una respuesta y su conversion
//!   a lineas de texto.
//!
//! * `session`: el bucle de comandos, en modo batch o interactivo.

pub mod blocking_client;
pub use blocking_client::BlockingClient;

pub mod client;
pub use client::Client;

pub mod cmd;
pub use cmd::{Flow, Line};

pub mod config;
pub use config::{Cli, ConnectionDescriptor};

pub mod logging;

pub mod reply;
pub use reply::Reply;

pub mod render;

pub mod session;
pub use session::Exit;

mod store;
pub use store::Store;

/// Puerto por defecto que se utilizara si la direccion no incluye uno.
pub const DEFAULT_PORT: u16 = 6379;

/// Error retornado por la mayoria de funciones.
///
/// Igual que en el resto del crate se utiliza un boxed `std::error::Error`;
/// los errores que necesitan distinguir causas (por ejemplo
/// `config::ConfigError`) son enumeraciones que implementan
/// `std::error::Error` y se convierten en este tipo con `?`.
pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// Un `Result` especializado para las operaciones del crate.
pub type Result<T> = std::result::Result<T, Error>;
