//! Conversion de una `Reply` a lineas de texto.

use crate::Reply;

use std::io::{self, Write};
use tracing::{debug, error};

/// Pinta `reply` en `dst`, una linea por valor.
///
/// Las listas se pintan elemento a elemento aplicando las mismas reglas.
/// Si una lista contiene otras listas se aplanan de forma recursiva.
///
/// Cada linea se escribe y se hace `flush` en cuanto esta disponible.
pub fn render<W: Write + ?Sized>(reply: &Reply, dst: &mut W) -> io::Result<()> {
    match reply {
        Reply::List(items) => {
            for item in items {
                render(item, dst)?;
            }
            Ok(())
        }
        _ => match to_value_string(reply) {
            Some(line) => {
                writeln!(dst, "{}", line)?;
                dst.flush()
            }
            None => Ok(()),
        },
    }
}

/// Regla para un valor escalar.
///
/// Retorna `None` para las respuestas de error, que se envian al log en
/// lugar de a la salida. Las formas desconocidas dan una string vacia.
pub fn to_value_string(reply: &Reply) -> Option<String> {
    match reply {
        Reply::Error(msg) => {
            error!(cause = %msg, "Error executing command");
            None
        }
        Reply::Integer(num) => Some(num.to_string()),
        Reply::Text(text) => Some(text.clone()),
        Reply::Bytes(data) => Some(String::from_utf8_lossy(data).into_owned()),
        Reply::Null => Some("nil".to_string()),
        Reply::Unsupported(shape) => {
            debug!(%shape, "unsupported reply shape");
            Some(String::new())
        }
        // Una lista solo llega aqui si alguien la pasa directamente;
        // `render` nunca lo hace.
        Reply::List(_) => Some(String::new()),
    }
}
