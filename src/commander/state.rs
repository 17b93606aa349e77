//! Handlers that print local session state.

use super::{block, pretty, trailing, trimmed_block, Session};
use crate::error::Result;

impl Session {
    pub(super) fn cmd_self(&self, args: &[String]) -> Result<()> {
        let json = pretty("self", &self.membership.config().self_member)?;
        self.emit(&trimmed_block("CMD_SELF", &json, &trailing(args)));
        Ok(())
    }

    pub(super) fn cmd_list(&self, args: &[String]) -> Result<()> {
        let json = pretty("chat.memberlist", self.group.memberlist())?;
        self.emit(&trimmed_block("CMD_LIST", &json, &trailing(args)));
        Ok(())
    }

    pub(super) fn cmd_message(&self, args: &[String]) -> Result<()> {
        let json = pretty("chat.message", &self.group.message())?;
        self.emit(&trimmed_block("CMD_MESSAGE", &json, &trailing(args)));
        Ok(())
    }

    /// Unlike the other state blocks this one is emitted untrimmed.
    pub(super) fn cmd_logfile(&self, args: &[String]) -> Result<()> {
        let json = pretty("logfilename", &self.logfile)?;
        self.emit(&block("CMD_LOGFILE", &json, &trailing(args)));
        Ok(())
    }
}
