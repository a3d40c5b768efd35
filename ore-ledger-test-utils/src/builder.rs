//! Declarative test builder.
//!
//! The builder pattern allows chaining multiple configuration methods together, with all
//! operations queued and executed during the final `build()` call.

use mockito::Mock;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{constant::TEST_MAIL_SENDER_ID, error::TestError, TestContext};

/// Builder for declarative test initialization.
///
/// Provides an interface for setting up test environments with database tables,
/// ledger fixtures, and ESI endpoints. Finalize with `build()`.
pub struct TestBuilder {
    tables: Vec<TableCreateStatement>,
    include_ledger_tables: bool,

    // Database fixtures to insert
    miners: Vec<(i64, Option<i64>, f64)>, // (eve_id, alliance_id, amount_owed)
    refineries: Vec<(i64, i64, f64)>,     // (observer_id, solar_system_id, income)
    tax_rates: Vec<(i64, f64, f64)>,      // (type_id, unit_value, tax_rate)
    mining_activity: Vec<(i64, i64, i64, i64)>, // (type_id, quantity, miner_id, refinery_id)
    templates: Vec<(String, String, String)>, // (name, subject, body)
    inv_types: Vec<i64>,
    payments: Vec<(i64, f64)>,
    solar_systems: Vec<(i64, String)>,

    // Mock endpoints to create
    mock_builders: Vec<Box<dyn FnOnce(&mut mockito::ServerGuard) -> Mock>>,

    // Pre-configured endpoint shortcuts
    type_endpoints: Vec<(i64, usize)>,              // (type_id, expected_requests)
    type_error_endpoints: Vec<(i64, usize, usize)>, // (type_id, status, expected_requests)
    mail_endpoints: Vec<(i64, usize, usize)>,       // (recipient_id, status, expected_requests)
}

impl TestBuilder {
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            include_ledger_tables: false,
            miners: Vec::new(),
            refineries: Vec::new(),
            tax_rates: Vec::new(),
            mining_activity: Vec::new(),
            templates: Vec::new(),
            inv_types: Vec::new(),
            payments: Vec::new(),
            solar_systems: Vec::new(),
            mock_builders: Vec::new(),
            type_endpoints: Vec::new(),
            type_error_endpoints: Vec::new(),
            mail_endpoints: Vec::new(),
        }
    }

    /// Add every table used by the invoice pipeline to the test database.
    pub fn with_ledger_tables(mut self) -> Self {
        self.include_ledger_tables = true;
        self
    }

    /// Add a custom entity table to the test database.
    ///
    /// ```no_run
    /// use ore_ledger_test_utils::TestBuilder;
    /// use entity::prelude::*;
    ///
    /// # async fn example() -> Result<(), ore_ledger_test_utils::TestError> {
    /// let test = TestBuilder::new()
    ///     .with_table(Miner)
    ///     .with_table(Refinery)
    ///     .build()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Insert a miner with the provided outstanding balance.
    pub fn with_miner(mut self, eve_id: i64, alliance_id: Option<i64>, amount_owed: f64) -> Self {
        self.miners.push((eve_id, alliance_id, amount_owed));
        self
    }

    /// Insert a refinery with the provided income.
    pub fn with_refinery(mut self, observer_id: i64, solar_system_id: i64, income: f64) -> Self {
        self.refineries.push((observer_id, solar_system_id, income));
        self
    }

    pub fn with_tax_rate(mut self, type_id: i64, unit_value: f64, tax_rate: f64) -> Self {
        self.tax_rates.push((type_id, unit_value, tax_rate));
        self
    }

    /// Insert an unprocessed mining activity record.
    ///
    /// The miner and refinery are referenced by EVE ID and observer ID and are not created.
    pub fn with_mining_activity(
        mut self,
        type_id: i64,
        quantity: i64,
        miner_id: i64,
        refinery_id: i64,
    ) -> Self {
        self.mining_activity
            .push((type_id, quantity, miner_id, refinery_id));
        self
    }

    pub fn with_template(mut self, name: &str, subject: &str, body: &str) -> Self {
        self.templates
            .push((name.to_string(), subject.to_string(), body.to_string()));
        self
    }

    /// Insert display metadata for a type so it is not fetched from ESI.
    pub fn with_inv_type(mut self, type_id: i64) -> Self {
        self.inv_types.push(type_id);
        self
    }

    pub fn with_payment(mut self, miner_id: i64, amount_received: f64) -> Self {
        self.payments.push((miner_id, amount_received));
        self
    }

    pub fn with_solar_system(mut self, solar_system_id: i64, name: &str) -> Self {
        self.solar_systems.push((solar_system_id, name.to_string()));
        self
    }

    /// Add a mock `/universe/types/{type_id}/` endpoint that is expected to be called
    /// exactly `expected_requests` times.
    pub fn with_type_endpoint(mut self, type_id: i64, expected_requests: usize) -> Self {
        self.type_endpoints.push((type_id, expected_requests));
        self
    }

    /// Add a mock `/universe/types/{type_id}/` endpoint responding with an error `status`.
    pub fn with_type_error_endpoint(
        mut self,
        type_id: i64,
        status: usize,
        expected_requests: usize,
    ) -> Self {
        self.type_error_endpoints
            .push((type_id, status, expected_requests));
        self
    }

    /// Add a mock mail endpoint for mail addressed to `recipient_id`, sent by
    /// [`TEST_MAIL_SENDER_ID`].
    pub fn with_mail_endpoint(
        mut self,
        recipient_id: i64,
        status: usize,
        expected_requests: usize,
    ) -> Self {
        self.mail_endpoints
            .push((recipient_id, status, expected_requests));
        self
    }

    /// Add a custom mock endpoint with full control over the mockito server.
    pub fn with_mock_endpoint<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut mockito::ServerGuard) -> Mock + 'static,
    {
        self.mock_builders.push(Box::new(setup));
        self
    }

    /// Build the test context by creating all configured tables, fixtures, and mock endpoints.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully configured test environment ready for use
    /// - `Err(TestError::DbErr)` - Database table creation or fixture insertion failed
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut context = TestContext::new().await?;

        // 1. Create tables
        let mut all_tables = Vec::new();

        if self.include_ledger_tables {
            let schema = Schema::new(sea_orm::DbBackend::Sqlite);
            all_tables.extend(vec![
                schema.create_table_from_entity(entity::prelude::TaxRate),
                schema.create_table_from_entity(entity::prelude::InvType),
                schema.create_table_from_entity(entity::prelude::Miner),
                schema.create_table_from_entity(entity::prelude::Refinery),
                schema.create_table_from_entity(entity::prelude::SolarSystem),
                schema.create_table_from_entity(entity::prelude::MiningActivity),
                schema.create_table_from_entity(entity::prelude::Invoice),
                schema.create_table_from_entity(entity::prelude::Payment),
                schema.create_table_from_entity(entity::prelude::Template),
            ]);
        }

        all_tables.extend(self.tables);
        context.with_tables(all_tables).await?;

        // 2. Insert database fixtures
        for (eve_id, alliance_id, amount_owed) in self.miners {
            context
                .ledger()
                .insert_miner(eve_id, alliance_id, amount_owed)
                .await?;
        }

        for (observer_id, solar_system_id, income) in self.refineries {
            context
                .ledger()
                .insert_refinery(observer_id, solar_system_id, income)
                .await?;
        }

        for (type_id, unit_value, tax_rate) in self.tax_rates {
            context
                .ledger()
                .insert_tax_rate(type_id, unit_value, tax_rate)
                .await?;
        }

        for (type_id, quantity, miner_id, refinery_id) in self.mining_activity {
            context
                .ledger()
                .insert_mining_activity(type_id, quantity, miner_id, refinery_id)
                .await?;
        }

        for (name, subject, body) in self.templates {
            context
                .ledger()
                .insert_template(&name, &subject, &body)
                .await?;
        }

        for type_id in self.inv_types {
            context.ledger().insert_inv_type(type_id).await?;
        }

        for (miner_id, amount_received) in self.payments {
            context
                .ledger()
                .insert_payment(miner_id, amount_received)
                .await?;
        }

        for (solar_system_id, name) in self.solar_systems {
            context
                .ledger()
                .insert_solar_system(solar_system_id, &name)
                .await?;
        }

        // 3. Create mock endpoints
        // Custom and error endpoints are created first, mockito matches mocks in creation order
        // so a test can fail the first request to a path and succeed on the retry
        let mut mocks = Vec::new();

        for builder in self.mock_builders {
            mocks.push(builder(&mut context.server));
        }

        for (type_id, status, expected) in self.type_error_endpoints {
            mocks.push(
                context
                    .esi()
                    .create_type_error_endpoint(type_id, status, expected),
            );
        }

        for (type_id, expected) in self.type_endpoints {
            mocks.push(context.esi().create_type_endpoint(type_id, expected));
        }

        for (recipient_id, status, expected) in self.mail_endpoints {
            mocks.push(context.esi().create_mail_endpoint(
                TEST_MAIL_SENDER_ID,
                recipient_id,
                status,
                expected,
            ));
        }

        // Store mocks in the context so they live as long as the test
        context.mocks = mocks;

        Ok(context)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
