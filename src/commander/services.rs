//! Service directory listing and remote service invocation.

use std::collections::BTreeMap;

use super::{pretty, trailing, trimmed_block, Session};
use crate::directory::{self, Catalog};
use crate::error::Result;

impl Session {
    pub(super) async fn cmd_services(&self, args: &[String]) -> Result<()> {
        let Some(catalog) = self.fetch_catalog("CMD_SERVICES").await else {
            return Ok(());
        };

        if catalog.is_empty() {
            self.emit("<CMD_SERVICES>: No service registered");
            return Ok(());
        }

        let sorted: BTreeMap<_, _> = catalog.iter().collect();
        let json = pretty("service catalog", &sorted)?;
        self.emit(&trimmed_block("CMD_SERVICES_LIST", &json, &trailing(args)));
        Ok(())
    }

    /// Invoke every catalog entry named `args[0]` with the remaining arguments.
    ///
    /// The first failing invocation ends the command; earlier replies stand.
    pub(super) async fn cmd_service(&self, args: &[String]) {
        let Some((name, rest)) = args.split_first() else {
            self.emit(
                "<CMD_SERVICE>: No service specified - use the command services to get a list of all available services",
            );
            return;
        };

        let Some(catalog) = self.fetch_catalog("CMD_SERVICE").await else {
            return;
        };

        if catalog.is_empty() {
            self.emit("<CMD_SERVICE>: No service registered");
            return;
        }

        let body = rest.join(" ");
        let mut invoked = 0;
        for srv in directory::matching(&catalog, name) {
            invoked += 1;
            tracing::info!("Invoking service {} at {}: {:?}", srv.name, srv.url, body);

            match self.directory.invoke(srv, &body).await {
                Ok(reply) => {
                    self.emit(&format!("<CMD_SERVICE_{}>: {}", srv.name.to_uppercase(), reply));
                }
                Err(e) => {
                    self.report(format!("<CMD_SERVICE>: {} ({}) {}", srv.name, srv.url, e));
                    return;
                }
            }
        }

        if invoked == 0 {
            self.emit(&format!("<CMD_SERVICE>: Service {:?} is not registered", name));
        }
    }

    async fn fetch_catalog(&self, tag: &str) -> Option<Catalog> {
        match self.directory.catalog().await {
            Ok(catalog) => Some(catalog),
            Err(e) => {
                self.report(format!("<{}>: {}", tag, e));
                None
            }
        }
    }
}
