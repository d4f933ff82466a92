//! Init command implementation.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"site:
  title: "Dagskrárbankinn"
  description: "Dagskrárhugmyndir og fréttir af þróun"

paths:
  devlogs: "content/devlogs"
  programs: "content/programs.json"

programs:
  page_size: 12

server:
  port: 8000
  max_devlog_limit: 50
"#;

/// Initialize a new dagskra project
pub fn init_project(path: Option<&Path>) -> Result<()> {
    let root = path.unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(root).with_context(|| format!("Failed to create {:?}", root))?;

    write_config(root)?;
    scaffold_content(root)?;

    println!("✓ dagskra initialized in {:?}", root);
    println!("  - Edit dagskra.yml to customize site metadata");
    println!("  - Write devlogs in content/devlogs/ (copy template.md to start)");
    Ok(())
}

fn write_config(root: &Path) -> Result<()> {
    let config_path = root.join("dagskra.yml");
    if config_path.exists() {
        println!("dagskra.yml already exists at {:?}", config_path);
        return Ok(());
    }

    fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {:?}", config_path))?;
    println!("Created {:?}", config_path);
    Ok(())
}

fn scaffold_content(root: &Path) -> Result<()> {
    let devlogs = root.join("content").join("devlogs");
    fs::create_dir_all(&devlogs).with_context(|| format!("Failed to create {:?}", devlogs))?;

    write_if_missing(&devlogs.join("template.md"), TEMPLATE_POST)?;
    write_if_missing(&devlogs.join("velkomin.md"), SAMPLE_POST)?;
    write_if_missing(&root.join("content").join("programs.json"), SAMPLE_PROGRAMS)?;

    Ok(())
}

fn write_if_missing(path: &Path, contents: &str) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    fs::write(path, contents).with_context(|| format!("Failed to write {:?}", path))?;
    println!("Created {:?}", path);
    Ok(())
}

const TEMPLATE_POST: &str = r#"---
title: Titill færslu
date: 2025-01-01
author: Nafn
tags: [fréttir]
summary: Ein setning um færsluna
---

Skrifaðu færsluna hér.
"#;

const SAMPLE_POST: &str = r#"---
title: Velkomin
date: 2025-01-01
author: Dagskrárteymið
tags: [fréttir]
summary: Fyrsta færslan
---

# Velkomin

Þetta er fyrsta **devlog** færslan. Keyrðu:

```
dagskra devlogs list
dagskra serve
```

- Færslur búa í `content/devlogs/`
- Dagskrár búa í `content/programs.json`
"#;

const SAMPLE_PROGRAMS: &str = r#"{
  "programs": [
    {
      "id": "1",
      "name": "Ratleikur",
      "description": "Ratleikur með korti og áttavita",
      "public": true,
      "like_count": 4,
      "created_at": "2025-01-10T12:00:00Z",
      "author": { "id": "u1", "name": "Sigga" },
      "workspace": { "id": "w1", "name": "Skátafélagið" },
      "tags": ["útivera", "kort"]
    },
    {
      "id": "2",
      "name": "Kvöldvaka",
      "description": "Söngvar og skemmtiatriði",
      "public": true,
      "like_count": 9,
      "created_at": "2025-02-01T18:30:00Z",
      "author": { "id": "u2", "name": "Jón" },
      "workspace": { "id": "w1", "name": "Skátafélagið" },
      "tags": ["söngur"]
    }
  ]
}
"#;
