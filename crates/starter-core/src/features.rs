//! Static feature table
//!
//! Every optional capability maps to the packages it needs and the wiring
//! that runs once those packages are installed. Nothing outside this table
//! knows which feature needs which package.

use crate::selections::FeatureId;
use crate::wiring::FileEdit;

/// Development packages installed for every project
pub const BASELINE_DEV_PACKAGES: &[&str] = &[
    "@types/node",
    "@types/react",
    "@types/react-dom",
    "eslint",
    "eslint-config-next",
    "prettier",
];

/// Content glob the Tailwind config is pointed at
pub const TAILWIND_CONTENT_GLOB: &str = r#"content: ["./src/**/*.{js,ts,jsx,tsx,mdx}"]"#;

/// Directives written into the generated global stylesheets
pub const TAILWIND_DIRECTIVES: &str = "@tailwind base;\n@tailwind components;\n@tailwind utilities;\n";

const TAILWIND_CONFIG_CANDIDATES: &[&str] = &["tailwind.config.ts", "tailwind.config.js"];

const GLOBAL_STYLESHEETS: &[&str] = &["src/app/globals.css", "src/styles/globals.css"];

const TAILWIND_CONFIG: &str = r#"import type { Config } from "tailwindcss";

const config: Config = {
  content: ["./src/**/*.{js,ts,jsx,tsx,mdx}"],
  theme: {
    extend: {},
  },
  plugins: [],
};

export default config;
"#;

const PRISMA_SCHEMA: &str = r#"generator client {
  provider = "prisma-client-js"
}

datasource db {
  provider = "sqlite"
  url      = "file:./dev.db"
}

model User {
  id        Int      @id @default(autoincrement())
  email     String   @unique
  name      String?
  createdAt DateTime @default(now())
}
"#;

const I18N_CONFIG: &str = r#"import { getRequestConfig } from "next-intl/server";

export const locales = ["en", "es", "fr"] as const;
export const defaultLocale = "en";

export type Locale = (typeof locales)[number];

export default getRequestConfig(async ({ requestLocale }) => {
  let locale = await requestLocale;
  if (!locale || !locales.includes(locale as Locale)) {
    locale = defaultLocale;
  }

  return {
    locale,
    messages: (await import(`../messages/${locale}.json`)).default,
  };
});
"#;

/// One unit of post-install wiring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wiring {
    /// Best-effort external tool run inside the project
    Tool {
        title: &'static str,
        program: &'static str,
        args: &'static [&'static str],
    },
    /// Deterministic local file edit
    Edit(FileEdit),
}

/// Static description of a feature
#[derive(Debug, Clone, Copy)]
pub struct FeatureSpec {
    pub id: FeatureId,
    pub runtime: &'static [&'static str],
    pub dev: &'static [&'static str],
    pub wiring: &'static [Wiring],
}

/// The feature table, in declaration order
pub const FEATURES: &[FeatureSpec] = &[
    FeatureSpec {
        id: FeatureId::Tailwind,
        runtime: &["tailwindcss", "postcss", "autoprefixer"],
        dev: &[],
        wiring: &[
            Wiring::Tool {
                title: "Initializing Tailwind CSS",
                program: "npx",
                args: &["tailwindcss", "init", "-p", "--ts"],
            },
            Wiring::Edit(FileEdit::RewriteContentGlob {
                candidates: TAILWIND_CONFIG_CANDIDATES,
                replacement: TAILWIND_CONTENT_GLOB,
                fallback: TAILWIND_CONFIG,
            }),
            Wiring::Edit(FileEdit::ReplaceIfExists {
                paths: GLOBAL_STYLESHEETS,
                contents: TAILWIND_DIRECTIVES,
            }),
        ],
    },
    FeatureSpec {
        id: FeatureId::Shadcn,
        runtime: &[
            "class-variance-authority",
            "clsx",
            "tailwind-merge",
            "lucide-react",
        ],
        dev: &[],
        wiring: &[Wiring::Tool {
            title: "Initializing shadcn/ui",
            program: "npx",
            args: &["shadcn@latest", "init", "-d"],
        }],
    },
    FeatureSpec {
        id: FeatureId::Prisma,
        runtime: &["@prisma/client"],
        dev: &["prisma"],
        wiring: &[
            Wiring::Edit(FileEdit::Write {
                path: "prisma/schema.prisma",
                contents: PRISMA_SCHEMA,
            }),
            Wiring::Tool {
                title: "Generating Prisma client",
                program: "npx",
                args: &["prisma", "generate"],
            },
            Wiring::Tool {
                title: "Running initial Prisma migration",
                program: "npx",
                args: &["prisma", "migrate", "dev", "--name", "init"],
            },
        ],
    },
    FeatureSpec {
        id: FeatureId::Zustand,
        runtime: &["zustand"],
        dev: &[],
        wiring: &[],
    },
    FeatureSpec {
        id: FeatureId::ReactQuery,
        runtime: &["@tanstack/react-query"],
        dev: &["@tanstack/react-query-devtools"],
        wiring: &[],
    },
    FeatureSpec {
        id: FeatureId::FramerMotion,
        runtime: &["framer-motion"],
        dev: &[],
        wiring: &[],
    },
    FeatureSpec {
        id: FeatureId::I18n,
        runtime: &["next-intl"],
        dev: &[],
        wiring: &[Wiring::Edit(FileEdit::Write {
            path: "src/i18n.ts",
            contents: I18N_CONFIG,
        })],
    },
    FeatureSpec {
        id: FeatureId::Jwt,
        runtime: &["jsonwebtoken"],
        dev: &["@types/jsonwebtoken"],
        wiring: &[],
    },
];

/// Look up the static description of a feature
pub fn spec(id: FeatureId) -> &'static FeatureSpec {
    FEATURES
        .iter()
        .find(|f| f.id == id)
        .unwrap_or_else(|| unreachable!("feature table covers every FeatureId"))
}
