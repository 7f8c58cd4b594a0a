//! Initial schema: master tables, translation tables, and the partial
//! indexes backing soft-delete visibility and name uniqueness.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(MASTER_SQL).await?;
        db.execute_unprepared(TRANSLATION_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(
            "DROP TABLE IF EXISTS
                account_translations, city_translations, sub_category_translations,
                country_translations, category_translations,
                accounts, cities, sub_categories, countries, categories
            CASCADE;",
        )
        .await?;
        Ok(())
    }
}

const MASTER_SQL: &str = r"
-- Master tables. Rows are never hard-deleted; is_deleted hides them from
-- every read, collision check, and dependency check.
CREATE TABLE categories (
    id UUID PRIMARY KEY,
    is_active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL,
    created_by UUID NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL,
    updated_by UUID,
    is_deleted BOOLEAN NOT NULL DEFAULT false,
    deleted_at TIMESTAMPTZ,
    deleted_by UUID
);

CREATE TABLE sub_categories (
    id UUID PRIMARY KEY,
    category_id UUID NOT NULL REFERENCES categories(id),
    is_active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL,
    created_by UUID NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL,
    updated_by UUID,
    is_deleted BOOLEAN NOT NULL DEFAULT false,
    deleted_at TIMESTAMPTZ,
    deleted_by UUID
);

CREATE TABLE countries (
    id UUID PRIMARY KEY,
    is_active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL,
    created_by UUID NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL,
    updated_by UUID,
    is_deleted BOOLEAN NOT NULL DEFAULT false,
    deleted_at TIMESTAMPTZ,
    deleted_by UUID
);

CREATE TABLE cities (
    id UUID PRIMARY KEY,
    country_id UUID NOT NULL REFERENCES countries(id),
    is_active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL,
    created_by UUID NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL,
    updated_by UUID,
    is_deleted BOOLEAN NOT NULL DEFAULT false,
    deleted_at TIMESTAMPTZ,
    deleted_by UUID
);

CREATE TABLE accounts (
    id UUID PRIMARY KEY,
    category_id UUID NOT NULL REFERENCES categories(id),
    sub_category_id UUID NOT NULL REFERENCES sub_categories(id),
    owner_id UUID NOT NULL,
    description VARCHAR(100),
    is_active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL,
    created_by UUID NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL,
    updated_by UUID,
    is_deleted BOOLEAN NOT NULL DEFAULT false,
    deleted_at TIMESTAMPTZ,
    deleted_by UUID
);

-- Dependency-guard and listing lookups only ever see live rows.
CREATE INDEX idx_sub_categories_category ON sub_categories(category_id) WHERE NOT is_deleted;
CREATE INDEX idx_cities_country ON cities(country_id) WHERE NOT is_deleted;
CREATE INDEX idx_accounts_category ON accounts(category_id) WHERE NOT is_deleted;
CREATE INDEX idx_accounts_sub_category ON accounts(sub_category_id) WHERE NOT is_deleted;
CREATE INDEX idx_accounts_owner ON accounts(owner_id, created_at) WHERE NOT is_deleted;

CREATE INDEX idx_categories_created ON categories(created_at) WHERE NOT is_deleted;
CREATE INDEX idx_sub_categories_created ON sub_categories(created_at) WHERE NOT is_deleted;
CREATE INDEX idx_countries_created ON countries(created_at) WHERE NOT is_deleted;
CREATE INDEX idx_cities_created ON cities(created_at) WHERE NOT is_deleted;
";

const TRANSLATION_SQL: &str = r"
-- Translation tables: one active row per (owner, language); names unique
-- per language across all live rows of a kind, case-insensitively. The
-- partial unique indexes close the check-then-insert race behind the
-- application-level uniqueness checks.
CREATE TABLE category_translations (
    id UUID PRIMARY KEY,
    category_id UUID NOT NULL REFERENCES categories(id),
    lang VARCHAR(10) NOT NULL,
    name VARCHAR(100) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL,
    created_by UUID NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL,
    updated_by UUID,
    is_deleted BOOLEAN NOT NULL DEFAULT false,
    deleted_at TIMESTAMPTZ,
    deleted_by UUID
);

CREATE INDEX idx_category_translations_owner
    ON category_translations(category_id) WHERE NOT is_deleted;
CREATE UNIQUE INDEX uq_category_translations_owner_lang
    ON category_translations(category_id, lower(lang)) WHERE NOT is_deleted;
CREATE UNIQUE INDEX uq_category_translations_lang_name
    ON category_translations(lower(lang), lower(name)) WHERE NOT is_deleted;

CREATE TABLE sub_category_translations (
    id UUID PRIMARY KEY,
    sub_category_id UUID NOT NULL REFERENCES sub_categories(id),
    lang VARCHAR(10) NOT NULL,
    name VARCHAR(100) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL,
    created_by UUID NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL,
    updated_by UUID,
    is_deleted BOOLEAN NOT NULL DEFAULT false,
    deleted_at TIMESTAMPTZ,
    deleted_by UUID
);

CREATE INDEX idx_sub_category_translations_owner
    ON sub_category_translations(sub_category_id) WHERE NOT is_deleted;
CREATE UNIQUE INDEX uq_sub_category_translations_owner_lang
    ON sub_category_translations(sub_category_id, lower(lang)) WHERE NOT is_deleted;
CREATE UNIQUE INDEX uq_sub_category_translations_lang_name
    ON sub_category_translations(lower(lang), lower(name)) WHERE NOT is_deleted;

CREATE TABLE country_translations (
    id UUID PRIMARY KEY,
    country_id UUID NOT NULL REFERENCES countries(id),
    lang VARCHAR(10) NOT NULL,
    name VARCHAR(100) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL,
    created_by UUID NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL,
    updated_by UUID,
    is_deleted BOOLEAN NOT NULL DEFAULT false,
    deleted_at TIMESTAMPTZ,
    deleted_by UUID
);

CREATE INDEX idx_country_translations_owner
    ON country_translations(country_id) WHERE NOT is_deleted;
CREATE UNIQUE INDEX uq_country_translations_owner_lang
    ON country_translations(country_id, lower(lang)) WHERE NOT is_deleted;
CREATE UNIQUE INDEX uq_country_translations_lang_name
    ON country_translations(lower(lang), lower(name)) WHERE NOT is_deleted;

CREATE TABLE city_translations (
    id UUID PRIMARY KEY,
    city_id UUID NOT NULL REFERENCES cities(id),
    lang VARCHAR(10) NOT NULL,
    name VARCHAR(100) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL,
    created_by UUID NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL,
    updated_by UUID,
    is_deleted BOOLEAN NOT NULL DEFAULT false,
    deleted_at TIMESTAMPTZ,
    deleted_by UUID
);

CREATE INDEX idx_city_translations_owner
    ON city_translations(city_id) WHERE NOT is_deleted;
CREATE UNIQUE INDEX uq_city_translations_owner_lang
    ON city_translations(city_id, lower(lang)) WHERE NOT is_deleted;
CREATE UNIQUE INDEX uq_city_translations_lang_name
    ON city_translations(lower(lang), lower(name)) WHERE NOT is_deleted;

CREATE TABLE account_translations (
    id UUID PRIMARY KEY,
    account_id UUID NOT NULL REFERENCES accounts(id),
    lang VARCHAR(10) NOT NULL,
    name VARCHAR(100) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL,
    created_by UUID NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL,
    updated_by UUID,
    is_deleted BOOLEAN NOT NULL DEFAULT false,
    deleted_at TIMESTAMPTZ,
    deleted_by UUID
);

CREATE INDEX idx_account_translations_owner
    ON account_translations(account_id) WHERE NOT is_deleted;
CREATE UNIQUE INDEX uq_account_translations_owner_lang
    ON account_translations(account_id, lower(lang)) WHERE NOT is_deleted;
CREATE UNIQUE INDEX uq_account_translations_lang_name
    ON account_translations(lower(lang), lower(name)) WHERE NOT is_deleted;
";
