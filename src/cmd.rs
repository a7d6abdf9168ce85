use crate::{render, Store};

use std::io::Write;
use tracing::{debug, error, info, instrument};

/// Una linea de entrada ya interpretada.
#[derive(Debug, PartialEq, Eq)]
pub enum Line {
    /// La linea era `exit`.
    Exit,
    /// Linea vacia o solo con espacios. Se ignora.
    Empty,
    /// Tokens a enviar al servidor. Nunca esta vacio.
    Command(Vec<String>),
}

/// Que debe hacer el bucle despues de procesar una linea.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

impl Line {
    /// Parsea una linea de entrada.
    ///
    /// Los espacios alrededor se eliminan antes de comparar con `exit`. El
    /// resto se separa por espacios en blanco; el primer token es el nombre
    /// del comando pero no se distingue de los argumentos.
    pub fn parse(src: &str) -> Line {
        let src = src.trim();
        if src == "exit" {
            return Line::Exit;
        }

        let args: Vec<String> = src.split_whitespace().map(str::to_string).collect();
        if args.is_empty() {
            Line::Empty
        } else {
            Line::Command(args)
        }
    }
}

/// Procesa una linea: la parsea, la envia a `store` y pinta la respuesta en
/// `dst`.
///
/// Un fallo al ejecutar el comando se registra en el log y no detiene el
/// bucle. `exit` se comunica al llamante sin tocar `store`.
///
/// La linea no se registra en el span porque puede llevar credenciales
/// (`AUTH`, `CONFIG SET requirepass`).
#[instrument(skip(store, line, dst))]
pub fn handle_line<S, W>(store: &mut S, line: &str, dst: &mut W) -> Flow
where
    S: Store + ?Sized,
    W: Write + ?Sized,
{
    let args = match Line::parse(line) {
        Line::Exit => {
            info!("exiting...");
            return Flow::Exit;
        }
        Line::Empty => return Flow::Continue,
        Line::Command(args) => args,
    };

    let reply = match store.execute(&args) {
        Ok(reply) => reply,
        Err(err) => {
            error!(cause = %err, "Error executing command");
            return Flow::Continue;
        }
    };

    debug!(?reply);

    if let Err(err) = render::render(&reply, dst) {
        error!(cause = %err, "failed to write reply");
    }

    Flow::Continue
}
