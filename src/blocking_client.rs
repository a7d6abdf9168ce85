//! Cliente bloqueante.
//!
//! Envuelve el `Client` asincrono con un runtime de Tokio de un solo thread
//! y bloquea en cada llamada. El bucle de comandos es sincrono: se envia un
//! comando, se espera la respuesta y se pinta antes de leer la siguiente
//! linea.

use crate::{client, ConnectionDescriptor, Reply, Store};

use tokio::runtime::Runtime;

/// Conexion establecida con el servidor.
pub struct BlockingClient {
    /// El cliente asincrono.
    inner: client::Client,

    /// Runtime de tipo `current_thread` sobre el que se ejecutan las
    /// operaciones del cliente asincrono.
    rt: Runtime,
}

impl BlockingClient {
    /// Establece la conexion con el servidor descrito en `descriptor`.
    pub fn connect(descriptor: &ConnectionDescriptor) -> crate::Result<BlockingClient> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        let inner = rt.block_on(client::connect(descriptor))?;

        Ok(BlockingClient { inner, rt })
    }

    pub fn ping(&mut self) -> crate::Result<()> {
        self.rt.block_on(self.inner.ping())
    }

    pub fn execute(&mut self, args: &[String]) -> crate::Result<Reply> {
        self.rt.block_on(self.inner.execute(args))
    }
}

impl Store for BlockingClient {
    fn ping(&mut self) -> crate::Result<()> {
        BlockingClient::ping(self)
    }

    fn execute(&mut self, args: &[String]) -> crate::Result<Reply> {
        BlockingClient::execute(self, args)
    }
}
