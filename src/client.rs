//! Cliente asincrono.
//!
//! Adaptador sobre el crate `redis`, que se encarga de la conexion, la
//! autenticacion, la seleccion de base de datos y de codificar y
//! decodificar el protocolo. Aqui solo se construyen los comandos y se
//! convierten las respuestas a `Reply`.

use crate::{ConnectionDescriptor, Reply};

use redis::aio::{ConnectionLike, MultiplexedConnection};
use tracing::{debug, instrument};

/// Conexion establecida con el servidor.
///
/// Se crea mediante la funcion `connect`.
pub struct Client {
    /// Conexion con el servidor. La autenticacion y el `SELECT` de la base
    /// de datos ya se han realizado al crearla.
    connection: MultiplexedConnection,
}

/// Establece la conexion con el servidor descrito en `descriptor`.
///
/// # Examples
///
/// ```no_run
/// use redish::{client, Cli, ConnectionDescriptor};
///
/// #[tokio::main]
/// async fn main() {
///     let cli = Cli::parse_args(vec!["redish"]);
///     let descriptor = ConnectionDescriptor::from_cli(&cli, |_| None).unwrap();
///
///     let client = match client::connect(&descriptor).await {
///         Ok(client) => client,
///         Err(_) => panic!("failed to establish connection"),
///     };
/// # drop(client);
/// }
/// ```
#[instrument(skip(descriptor), fields(server = %descriptor))]
pub async fn connect(descriptor: &ConnectionDescriptor) -> crate::Result<Client> {
    let client = redis::Client::open(descriptor.to_connection_info())?;

    let connection = client.get_multiplexed_async_connection().await?;

    debug!("connection established");

    Ok(Client { connection })
}

impl Client {
    /// Envia `PING` y espera `PONG`.
    #[instrument(skip(self))]
    pub async fn ping(&mut self) -> crate::Result<()> {
        let response: String = redis::cmd("PING").query_async(&mut self.connection).await?;

        debug!(?response);

        if response.eq_ignore_ascii_case("PONG") {
            Ok(())
        } else {
            Err(format!("unexpected ping response: {}", response).into())
        }
    }

    /// Ejecuta un comando arbitrario.
    ///
    /// `args[0]` es el nombre del comando; el resto se envia como
    /// argumentos sin modificar. Solo el nombre se registra en el span, los
    /// argumentos pueden contener credenciales.
    ///
    /// Los errores del servidor no se convierten en `Err`: llegan como
    /// `Reply::Error`, tambien dentro de una lista, para que el resto de
    /// elementos se pueda pintar.
    #[instrument(skip(self, args), fields(command = %args.first().map(String::as_str).unwrap_or("")))]
    pub async fn execute(&mut self, args: &[String]) -> crate::Result<Reply> {
        let (name, rest) = args
            .split_first()
            .ok_or("cannot execute an empty command")?;

        let mut cmd = redis::cmd(name);
        for arg in rest {
            cmd.arg(arg);
        }

        let value = self.connection.req_packed_command(&cmd).await?;

        debug!(response = ?value);

        Ok(Reply::from(value))
    }
}
