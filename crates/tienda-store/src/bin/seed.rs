//! # Seed Data Generator
//!
//! Populates the data directory with development documents: a small pet
//! shop catalog, two users and an empty ventas collection.
//!
//! ## Usage
//! ```bash
//! # Seed ./data (default)
//! cargo run -p tienda-store --bin seed
//!
//! # Specify data directory
//! cargo run -p tienda-store --bin seed -- --data-dir ./data
//! ```
//!
//! Existing documents are replaced; run this only against development data.

use std::env;

use serde_json::json;
use tienda_core::{Producto, Usuario, Venta};
use tienda_store::{Collection, Database, StoreConfig};

/// (nombre, marca, categoria, precio, stock) for the development catalog.
const PRODUCTOS: &[(&str, &str, &str, f64, i64)] = &[
    ("Alimento Perro Adulto 3kg", "Royal Canin", "alimentos", 18999.99, 25),
    ("Alimento Gato Castrado 1.5kg", "Whiskas", "alimentos", 7450.5, 40),
    ("Correa Retráctil 5m", "Flexi", "accesorios", 9990.0, 15),
    ("Collar Antipulgas", "Seresto", "salud", 31200.0, 8),
    ("Hueso de Juguete", "Kong", "juguetes", 4500.0, 60),
    ("Arena Sanitaria 10kg", "Tidy Cats", "higiene", 6800.75, 30),
    ("Shampoo Hipoalergénico", "Osspret", "higiene", 3150.0, 22),
    ("Rascador Torre 60cm", "Catit", "accesorios", 25999.0, 5),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut data_dir = String::from("./data");
    let mut i = 1;
    while i < args.len() {
        if args[i] == "--data-dir" && i + 1 < args.len() {
            data_dir = args[i + 1].clone();
            i += 1;
        }
        i += 1;
    }

    let db = Database::new(StoreConfig::new(&data_dir)).await?;

    let productos: Vec<Producto> = PRODUCTOS
        .iter()
        .enumerate()
        .map(|(i, (nombre, marca, categoria, precio, stock))| Producto {
            id: i as u32 + 1,
            nombre: nombre.to_string(),
            marca: marca.to_string(),
            categoria: categoria.to_string(),
            precio: *precio,
            stock: *stock,
            disponible: true,
            desc: String::new(),
            imagen: String::new(),
        })
        .collect();

    let usuarios = vec![
        Usuario {
            id: 1,
            nombre: "Ana".into(),
            apellido: "García".into(),
            email: "ana@example.com".into(),
            contrasena: "cambiar-en-produccion".into(),
            telefono: "555-0100".into(),
            mascotas: vec![json!({"nombre": "Firulais", "tipo": "perro"})],
        },
        Usuario {
            id: 2,
            nombre: "Luis".into(),
            apellido: "Pérez".into(),
            email: "luis@example.com".into(),
            contrasena: "cambiar-en-produccion".into(),
            telefono: String::new(),
            mascotas: vec![json!({"nombre": "Michi", "tipo": "gato"})],
        },
    ];

    db.store().write(Collection::Productos, &productos).await?;
    db.store().write(Collection::Usuarios, &usuarios).await?;
    db.store().write::<Venta>(Collection::Ventas, &[]).await?;

    println!(
        "Seeded {} productos and {} usuarios into {}",
        productos.len(),
        usuarios.len(),
        data_dir
    );
    Ok(())
}
