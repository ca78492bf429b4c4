use super::parsing::{cors_origins, flag, number, route_prefix, var, var_or};
use super::secret::load_or_create_secret_key;
use super::types::{
    AdminSettings, ApiSettings, ConfigError, CorsSettings, DatabaseSettings, Environment,
    RuntimeSettings, SecuritySettings, ServerSettings, Settings, TelemetrySettings,
};

impl Settings {
    pub(crate) fn load() -> Result<Self, ConfigError> {
        let settings = Self {
            server: load_server()?,
            runtime: load_runtime(),
            api: ApiSettings {
                project_name: var_or("PROJECT_NAME", "LMS API Server"),
                version: var_or("VERSION", env!("CARGO_PKG_VERSION")),
                api_prefix: route_prefix(&var_or("API_PREFIX", "/api"))?,
            },
            security: load_security()?,
            cors: CorsSettings { origins: cors_origins(var("BACKEND_CORS_ORIGINS"))? },
            database: load_database()?,
            admin: AdminSettings {
                first_admin_name: var_or("FIRST_ADMIN_NAME", "Administrator"),
                first_admin_email: var_or("FIRST_ADMIN_EMAIL", "admin@lms.local"),
                first_admin_password: var_or("FIRST_ADMIN_PASSWORD", ""),
            },
            telemetry: TelemetrySettings {
                log_level: var_or("LMS_LOG_LEVEL", "info"),
                json: flag("LMS_LOG_JSON"),
                prometheus_enabled: flag("PROMETHEUS_ENABLED"),
            },
        };

        settings.check_strict()?;
        Ok(settings)
    }

    pub(crate) fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub(crate) fn server(&self) -> &ServerSettings {
        &self.server
    }

    pub(crate) fn runtime(&self) -> &RuntimeSettings {
        &self.runtime
    }

    pub(crate) fn api(&self) -> &ApiSettings {
        &self.api
    }

    pub(crate) fn security(&self) -> &SecuritySettings {
        &self.security
    }

    pub(crate) fn cors(&self) -> &CorsSettings {
        &self.cors
    }

    pub(crate) fn database(&self) -> &DatabaseSettings {
        &self.database
    }

    pub(crate) fn admin(&self) -> &AdminSettings {
        &self.admin
    }

    pub(crate) fn telemetry(&self) -> &TelemetrySettings {
        &self.telemetry
    }

    /// Secrets that may only be left blank outside strict mode.
    fn check_strict(&self) -> Result<(), ConfigError> {
        if !self.runtime.strict_config {
            return Ok(());
        }
        if self.database.database_url.is_none() && self.database.postgres_password.is_empty() {
            return Err(ConfigError::MissingSecret("POSTGRES_PASSWORD"));
        }
        if self.admin.first_admin_password.is_empty() {
            return Err(ConfigError::MissingSecret("FIRST_ADMIN_PASSWORD"));
        }
        Ok(())
    }
}

fn load_server() -> Result<ServerSettings, ConfigError> {
    let host = var_or("LMS_HOST", "0.0.0.0");
    let port: u16 = number("LMS_PORT", 3000)?;
    if port == 0 {
        return Err(ConfigError::InvalidValue { field: "LMS_PORT", value: port.to_string() });
    }

    Ok(ServerSettings { host, port })
}

fn load_runtime() -> RuntimeSettings {
    let environment = var("LMS_ENV")
        .or_else(|| var("ENVIRONMENT"))
        .map(|name| Environment::from_name(&name))
        .unwrap_or(Environment::Development);

    RuntimeSettings {
        strict_config: flag("LMS_STRICT_CONFIG") || environment == Environment::Production,
        environment,
    }
}

fn load_security() -> Result<SecuritySettings, ConfigError> {
    let algorithm = var_or("ALGORITHM", "HS256");
    if algorithm != "HS256" {
        return Err(ConfigError::InvalidValue { field: "ALGORITHM", value: algorithm });
    }

    Ok(SecuritySettings {
        secret_key: var("SECRET_KEY")
            .or_else(|| var("JWT_SECRET"))
            .unwrap_or_else(load_or_create_secret_key),
        access_token_expire_minutes: number("ACCESS_TOKEN_EXPIRE_MINUTES", 1440)?,
        algorithm,
    })
}

fn load_database() -> Result<DatabaseSettings, ConfigError> {
    let max_connections: u32 = number("DB_MAX_CONNECTIONS", 20)?;
    if max_connections == 0 {
        return Err(ConfigError::InvalidValue { field: "DB_MAX_CONNECTIONS", value: "0".into() });
    }

    Ok(DatabaseSettings {
        postgres_server: var_or("POSTGRES_SERVER", "localhost"),
        postgres_port: number("POSTGRES_PORT", 5432)?,
        postgres_user: var_or("POSTGRES_USER", "lms"),
        postgres_password: var_or("POSTGRES_PASSWORD", ""),
        postgres_db: var_or("POSTGRES_DB", "lms"),
        database_url: var("DATABASE_URL"),
        max_connections,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;

    #[test]
    fn environment_names() {
        assert_eq!(Environment::from_name("PROD"), Environment::Production);
        assert_eq!(Environment::from_name("testing"), Environment::Test);
        assert_eq!(Environment::from_name("qa"), Environment::Development);
    }

    #[test]
    fn defaults_apply_in_test_env() {
        let settings = test_support::test_settings();

        assert_eq!(settings.api().api_prefix, "/api");
        assert_eq!(settings.api().project_name, "LMS API Server");
        assert_eq!(settings.runtime().environment, Environment::Test);
        assert!(!settings.runtime().strict_config);
        assert_eq!(settings.security().algorithm, "HS256");
        assert!(!settings.telemetry().prometheus_enabled);
    }

    #[test]
    fn strict_mode_requires_admin_password() {
        let _guard = test_support::env_lock_blocking();
        test_support::set_test_env();
        std::env::set_var("LMS_STRICT_CONFIG", "1");

        let result = Settings::load();
        std::env::set_var("LMS_STRICT_CONFIG", "0");

        assert!(matches!(result, Err(ConfigError::MissingSecret("FIRST_ADMIN_PASSWORD"))));
    }

    #[test]
    fn bad_numbers_are_reported_by_key() {
        let _guard = test_support::env_lock_blocking();
        test_support::set_test_env();
        std::env::set_var("DB_MAX_CONNECTIONS", "many");

        let result = Settings::load();
        std::env::remove_var("DB_MAX_CONNECTIONS");

        match result {
            Err(ConfigError::InvalidValue { field, value }) => {
                assert_eq!(field, "DB_MAX_CONNECTIONS");
                assert_eq!(value, "many");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
