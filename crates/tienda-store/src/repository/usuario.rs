//! # Usuario Repository
//!
//! Account operations. Every method that returns a user returns the
//! [`UsuarioPublico`] projection - the persisted credential never crosses
//! this module's boundary, on any path.

use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};
use crate::store::{Collection, Database};
use tienda_core::validation::texto_requerido;
use tienda_core::{
    next_id, CoreError, Credenciales, NuevoUsuario, Usuario, UsuarioPublico, UsuarioUpdate,
    ValidationError, Venta,
};

/// Field list echoed in the required-fields validation message.
const CAMPOS_REQUERIDOS: &str = "nombre, apellido, email y contraseña";

/// Field list for the login payload.
const CAMPOS_LOGIN: &str = "email y contraseña";

/// Repository for account operations.
#[derive(Debug, Clone)]
pub struct UsuarioRepository {
    db: Database,
}

impl UsuarioRepository {
    pub fn new(db: Database) -> Self {
        UsuarioRepository { db }
    }

    /// Returns all users, redacted.
    pub async fn list(&self) -> StoreResult<Vec<UsuarioPublico>> {
        let usuarios: Vec<Usuario> = self.db.store().read(Collection::Usuarios).await?;
        Ok(usuarios.into_iter().map(UsuarioPublico::from).collect())
    }

    /// Returns one user by id, redacted.
    pub async fn get(&self, id: u32) -> StoreResult<UsuarioPublico> {
        let usuarios: Vec<Usuario> = self.db.store().read(Collection::Usuarios).await?;
        usuarios
            .into_iter()
            .find(|u| u.id == id)
            .map(UsuarioPublico::from)
            .ok_or_else(|| CoreError::UsuarioNoEncontrado { id }.into())
    }

    /// Creates a user and returns it redacted.
    ///
    /// Email uniqueness is enforced here, at creation time only.
    pub async fn create(&self, nuevo: NuevoUsuario) -> StoreResult<UsuarioPublico> {
        let nombre = texto_requerido(nuevo.nombre);
        let apellido = texto_requerido(nuevo.apellido);
        let email = texto_requerido(nuevo.email);
        let contrasena = texto_requerido(nuevo.contrasena);
        let (Some(nombre), Some(apellido), Some(email), Some(contrasena)) =
            (nombre, apellido, email, contrasena)
        else {
            return Err(ValidationError::Requeridos {
                fields: CAMPOS_REQUERIDOS,
            }
            .into());
        };

        let _usuarios_guard = self.db.lock_usuarios().await;

        let mut usuarios: Vec<Usuario> = self.db.store().read(Collection::Usuarios).await?;
        if usuarios.iter().any(|u| u.email == email) {
            warn!(email = %email, "Email ya registrado");
            return Err(StoreError::Core(CoreError::EmailRegistrado { email }));
        }

        let usuario = Usuario {
            id: next_id(usuarios.iter().map(|u| u.id), 1),
            nombre,
            apellido,
            email,
            contrasena,
            telefono: nuevo.telefono.unwrap_or_default(),
            mascotas: nuevo.mascotas.unwrap_or_default(),
        };
        usuarios.push(usuario.clone());
        self.db
            .store()
            .write(Collection::Usuarios, &usuarios)
            .await?;

        info!(id = usuario.id, email = %usuario.email, "Usuario creado");
        Ok(UsuarioPublico::from(usuario))
    }

    /// Checks a credential pair against the collection.
    ///
    /// Both fields must match one record exactly. The redacted user is
    /// returned; token issuance is the caller's concern.
    pub async fn authenticate(&self, credenciales: Credenciales) -> StoreResult<UsuarioPublico> {
        let email = texto_requerido(credenciales.email);
        let contrasena = texto_requerido(credenciales.contrasena);
        let (Some(email), Some(contrasena)) = (email, contrasena) else {
            return Err(ValidationError::Requeridos {
                fields: CAMPOS_LOGIN,
            }
            .into());
        };

        let usuarios: Vec<Usuario> = self.db.store().read(Collection::Usuarios).await?;
        let usuario = usuarios
            .into_iter()
            .find(|u| u.email == email && u.contrasena == contrasena);

        match usuario {
            Some(usuario) => {
                info!(id = usuario.id, "Login correcto");
                Ok(UsuarioPublico::from(usuario))
            }
            None => {
                warn!(email = %email, "Credenciales inválidas");
                Err(StoreError::Core(CoreError::CredencialesInvalidas))
            }
        }
    }

    /// Applies a partial update and returns the user redacted.
    ///
    /// `mascotas` replaces the stored sequence only when a sequence was
    /// supplied. Email uniqueness is not re-checked here.
    pub async fn update(&self, id: u32, cambios: UsuarioUpdate) -> StoreResult<UsuarioPublico> {
        debug!(id, "update usuario");

        let _usuarios_guard = self.db.lock_usuarios().await;

        let mut usuarios: Vec<Usuario> = self.db.store().read(Collection::Usuarios).await?;
        let Some(usuario) = usuarios.iter_mut().find(|u| u.id == id) else {
            return Err(CoreError::UsuarioNoEncontrado { id }.into());
        };

        if let Some(nombre) = cambios.nombre {
            usuario.nombre = nombre;
        }
        if let Some(apellido) = cambios.apellido {
            usuario.apellido = apellido;
        }
        if let Some(email) = cambios.email {
            usuario.email = email;
        }
        if let Some(telefono) = cambios.telefono {
            usuario.telefono = telefono;
        }
        if let Some(mascotas) = cambios.mascotas {
            usuario.mascotas = mascotas;
        }

        let actualizado = usuario.clone();
        self.db
            .store()
            .write(Collection::Usuarios, &usuarios)
            .await?;

        info!(id, "Usuario actualizado");
        Ok(UsuarioPublico::from(actualizado))
    }

    /// Deletes a user and returns the removed record, redacted.
    ///
    /// Fails with a conflict when any sale references the user.
    pub async fn delete(&self, id: u32) -> StoreResult<UsuarioPublico> {
        debug!(id, "delete usuario");

        let _usuarios_guard = self.db.lock_usuarios().await;
        let _ventas_guard = self.db.lock_ventas().await;

        let mut usuarios: Vec<Usuario> = self.db.store().read(Collection::Usuarios).await?;
        let Some(posicion) = usuarios.iter().position(|u| u.id == id) else {
            return Err(CoreError::UsuarioNoEncontrado { id }.into());
        };

        let ventas: Vec<Venta> = self.db.store().read(Collection::Ventas).await?;
        if ventas.iter().any(|v| v.id_usuario == id) {
            return Err(StoreError::Core(CoreError::UsuarioConVentas { id }));
        }

        let eliminado = usuarios.remove(posicion);
        self.db
            .store()
            .write(Collection::Usuarios, &usuarios)
            .await?;

        info!(id, email = %eliminado.email, "Usuario eliminado");
        Ok(UsuarioPublico::from(eliminado))
    }
}
