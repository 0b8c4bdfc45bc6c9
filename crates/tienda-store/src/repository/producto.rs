//! # Producto Repository
//!
//! Catalog operations: CRUD, text search and the referential-integrity
//! gate on deletion.

use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::store::{Collection, Database};
use tienda_core::validation::{texto_requerido, validar_precio, validar_stock, validar_texto_busqueda};
use tienda_core::{next_id, CoreError, NuevoProducto, Producto, ProductoUpdate, ValidationError, Venta};

/// Field list echoed in the required-fields validation message.
const CAMPOS_REQUERIDOS: &str = "nombre, marca, categoria y precio";

/// Repository for catalog operations.
#[derive(Debug, Clone)]
pub struct ProductoRepository {
    db: Database,
}

impl ProductoRepository {
    pub fn new(db: Database) -> Self {
        ProductoRepository { db }
    }

    /// Returns all products, unmodified.
    pub async fn list(&self) -> StoreResult<Vec<Producto>> {
        self.db.store().read(Collection::Productos).await
    }

    /// Returns one product by id.
    pub async fn get(&self, id: u32) -> StoreResult<Producto> {
        let productos: Vec<Producto> = self.db.store().read(Collection::Productos).await?;
        productos
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| CoreError::ProductoNoEncontrado { id }.into())
    }

    /// Creates a product.
    ///
    /// `nombre`, `marca`, `categoria` and `precio` are required; `stock`
    /// defaults to 0, `disponible` to true and `desc`/`imagen` to the empty
    /// string. `precio >= 0` and `stock >= 0` hold from the moment the
    /// record exists.
    pub async fn create(&self, nuevo: NuevoProducto) -> StoreResult<Producto> {
        debug!(?nuevo, "create producto");

        let nombre = texto_requerido(nuevo.nombre);
        let marca = texto_requerido(nuevo.marca);
        let categoria = texto_requerido(nuevo.categoria);
        let (Some(nombre), Some(marca), Some(categoria), Some(precio)) =
            (nombre, marca, categoria, nuevo.precio)
        else {
            return Err(ValidationError::Requeridos {
                fields: CAMPOS_REQUERIDOS,
            }
            .into());
        };

        validar_precio(precio)?;
        let stock = nuevo.stock.unwrap_or(0);
        validar_stock(stock)?;

        let _productos_guard = self.db.lock_productos().await;

        let mut productos: Vec<Producto> = self.db.store().read(Collection::Productos).await?;
        let producto = Producto {
            id: next_id(productos.iter().map(|p| p.id), 1),
            nombre,
            marca,
            categoria,
            precio,
            stock,
            disponible: nuevo.disponible.unwrap_or(true),
            desc: nuevo.desc.unwrap_or_default(),
            imagen: nuevo.imagen.unwrap_or_default(),
        };
        productos.push(producto.clone());
        self.db
            .store()
            .write(Collection::Productos, &productos)
            .await?;

        info!(id = producto.id, nombre = %producto.nombre, "Producto creado");
        Ok(producto)
    }

    /// Case-insensitive substring search over `nombre` and `marca`.
    ///
    /// Empty search text is a ValidationError. An empty *result* is not an
    /// error here; the caller surfaces it as the NoMatch outcome.
    pub async fn search(&self, texto: &str) -> StoreResult<Vec<Producto>> {
        validar_texto_busqueda(texto)?;
        let filtro = texto.to_lowercase();

        let productos: Vec<Producto> = self.db.store().read(Collection::Productos).await?;
        let resultados: Vec<Producto> = productos
            .into_iter()
            .filter(|p| {
                p.nombre.to_lowercase().contains(&filtro)
                    || p.marca.to_lowercase().contains(&filtro)
            })
            .collect();

        debug!(texto = %texto, resultados = resultados.len(), "Búsqueda de productos");
        Ok(resultados)
    }

    /// Applies a partial update. Only supplied fields change; `precio` and
    /// `stock` are validated before the record is touched.
    pub async fn update(&self, id: u32, cambios: ProductoUpdate) -> StoreResult<Producto> {
        debug!(id, ?cambios, "update producto");

        if let Some(precio) = cambios.precio {
            validar_precio(precio)?;
        }
        if let Some(stock) = cambios.stock {
            validar_stock(stock)?;
        }

        let _productos_guard = self.db.lock_productos().await;

        let mut productos: Vec<Producto> = self.db.store().read(Collection::Productos).await?;
        let Some(producto) = productos.iter_mut().find(|p| p.id == id) else {
            return Err(CoreError::ProductoNoEncontrado { id }.into());
        };

        if let Some(nombre) = cambios.nombre {
            producto.nombre = nombre;
        }
        if let Some(marca) = cambios.marca {
            producto.marca = marca;
        }
        if let Some(categoria) = cambios.categoria {
            producto.categoria = categoria;
        }
        if let Some(precio) = cambios.precio {
            producto.precio = precio;
        }
        if let Some(stock) = cambios.stock {
            producto.stock = stock;
        }
        if let Some(disponible) = cambios.disponible {
            producto.disponible = disponible;
        }
        if let Some(desc) = cambios.desc {
            producto.desc = desc;
        }
        if let Some(imagen) = cambios.imagen {
            producto.imagen = imagen;
        }

        let actualizado = producto.clone();
        self.db
            .store()
            .write(Collection::Productos, &productos)
            .await?;

        info!(id, "Producto actualizado");
        Ok(actualizado)
    }

    /// Deletes a product and returns the removed record.
    ///
    /// Fails with a conflict when any sale's line items still reference the
    /// product; those sales must be deleted or modified first.
    pub async fn delete(&self, id: u32) -> StoreResult<Producto> {
        debug!(id, "delete producto");

        let _productos_guard = self.db.lock_productos().await;
        let _ventas_guard = self.db.lock_ventas().await;

        let mut productos: Vec<Producto> = self.db.store().read(Collection::Productos).await?;
        let Some(posicion) = productos.iter().position(|p| p.id == id) else {
            return Err(CoreError::ProductoNoEncontrado { id }.into());
        };

        let ventas: Vec<Venta> = self.db.store().read(Collection::Ventas).await?;
        if ventas.iter().any(|v| v.contiene_producto(id)) {
            return Err(StoreError::Core(CoreError::ProductoEnVentas { id }));
        }

        let eliminado = productos.remove(posicion);
        self.db
            .store()
            .write(Collection::Productos, &productos)
            .await?;

        info!(id, nombre = %eliminado.nombre, "Producto eliminado");
        Ok(eliminado)
    }
}
