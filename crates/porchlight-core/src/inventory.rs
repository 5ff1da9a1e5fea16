//! SQLite-backed rental inventory: prospects, properties, tour slots, bookings.

use std::path::Path;

use log::debug;
use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension, params};

use crate::error::StoreError;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    phone TEXT
);
CREATE TABLE IF NOT EXISTS properties (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    address TEXT NOT NULL,
    beds INTEGER NOT NULL,
    available BOOLEAN NOT NULL DEFAULT 1
);
CREATE TABLE IF NOT EXISTS availability (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    property_id INTEGER NOT NULL REFERENCES properties(id),
    start_time TEXT NOT NULL,
    end_time TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS bookings (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL REFERENCES users(id),
    property_id INTEGER NOT NULL REFERENCES properties(id),
    slot_id INTEGER NOT NULL REFERENCES availability(id)
);
";

/// One rentable property.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub id: i64,
    pub address: String,
    pub beds: u32,
    pub available: bool,
}

/// One tour window for a property. Times are stored as text, as seeded.
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    pub id: i64,
    pub property_id: i64,
    pub start_time: String,
    pub end_time: String,
}

/// Inventory database handle. Access is serialized through one connection.
pub struct Inventory {
    conn: Mutex<Connection>,
}

impl Inventory {
    /// Open (creating if needed) an inventory database at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let inventory = Self {
            conn: Mutex::new(conn),
        };
        inventory.ensure_schema()?;
        Ok(inventory)
    }

    /// Open an in-memory inventory.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let inventory = Self {
            conn: Mutex::new(conn),
        };
        inventory.ensure_schema()?;
        Ok(inventory)
    }

    fn ensure_schema(&self) -> Result<(), StoreError> {
        self.conn.lock().execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Execute a seed batch, typically the contents of a seed SQL file.
    pub fn seed_batch(&self, sql: &str) -> Result<(), StoreError> {
        self.conn.lock().execute_batch(sql)?;
        Ok(())
    }

    /// Insert a property, returning its id.
    pub fn add_property(
        &self,
        address: &str,
        beds: u32,
        available: bool,
    ) -> Result<i64, StoreError> {
        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO properties (address, beds, available) VALUES (?1, ?2, ?3)",
            params![address, beds, available],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Insert a tour slot for a property, returning its id.
    pub fn add_slot(
        &self,
        property_id: i64,
        start_time: &str,
        end_time: &str,
    ) -> Result<i64, StoreError> {
        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO availability (property_id, start_time, end_time) VALUES (?1, ?2, ?3)",
            params![property_id, start_time, end_time],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Find a prospect by email or create one, returning the user id.
    pub fn find_or_create_prospect(
        &self,
        name: &str,
        email: &str,
        phone: &str,
    ) -> Result<i64, StoreError> {
        let conn = self.conn.lock();
        let existing = conn
            .query_row(
                "SELECT id FROM users WHERE email = ?1",
                params![email],
                |row| row.get(0),
            )
            .optional()?;
        if let Some(id) = existing {
            debug!("prospect already on file (email={})", email);
            return Ok(id);
        }
        conn.execute(
            "INSERT INTO users (name, email, phone) VALUES (?1, ?2, ?3)",
            params![name, email, phone],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Properties with the requested bedroom count still marked available.
    pub fn available_properties(&self, beds: u32) -> Result<Vec<Property>, StoreError> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(
            "SELECT id, address, beds, available FROM properties
             WHERE beds = ?1 AND available = 1",
        )?;
        let rows = stmt.query_map(params![beds], |row| {
            Ok(Property {
                id: row.get(0)?,
                address: row.get(1)?,
                beds: row.get(2)?,
                available: row.get(3)?,
            })
        })?;
        let mut properties = Vec::new();
        for property in rows {
            properties.push(property?);
        }
        Ok(properties)
    }

    /// Earliest tour slot for a property with no booking against it.
    pub fn next_open_slot(&self, property_id: i64) -> Result<Option<Slot>, StoreError> {
        let conn = self.conn.lock();
        let slot = conn
            .query_row(
                "SELECT a.id, a.property_id, a.start_time, a.end_time
                 FROM availability a
                 LEFT JOIN bookings b ON b.slot_id = a.id
                 WHERE a.property_id = ?1 AND b.slot_id IS NULL
                 ORDER BY a.start_time ASC
                 LIMIT 1",
                params![property_id],
                |row| {
                    Ok(Slot {
                        id: row.get(0)?,
                        property_id: row.get(1)?,
                        start_time: row.get(2)?,
                        end_time: row.get(3)?,
                    })
                },
            )
            .optional()?;
        Ok(slot)
    }

    /// Record a booking, returning its id.
    pub fn book(&self, user_id: i64, property_id: i64, slot_id: i64) -> Result<i64, StoreError> {
        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO bookings (user_id, property_id, slot_id) VALUES (?1, ?2, ?3)",
            params![user_id, property_id, slot_id],
        )?;
        Ok(conn.last_insert_rowid())
    }
}
