// src/models/schema.rs

// Estrutura esperada pela aplicação do PDV. Nomes, tipos e constraints
// precisam bater com o que o backend lê e grava.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableDefinition {
    pub name: &'static str,
    pub columns: &'static [&'static str],
    pub create_sql: &'static str,
}

// Ordem de criação respeita as FKs: usuarios antes de vendas, vendas antes de itens_venda.
pub const TABLES: [TableDefinition; 5] = [USUARIOS, PRODUTOS, CLIENTES, VENDAS, ITENS_VENDA];

// Tabela de controle de migrações; nunca é truncada.
pub const MIGRATION_TABLE: &str = "alembic_version";

pub const USUARIOS: TableDefinition = TableDefinition {
    name: "usuarios",
    columns: &[
        "id",
        "nome",
        "usuario",
        "senha_hash",
        "is_admin",
        "ativo",
        "nivel",
        "salario",
        "pode_abastecer",
        "pode_gerenciar_despesas",
        "pode_fazer_devolucao",
        "created_at",
        "updated_at",
    ],
    create_sql: r#"
        CREATE TABLE usuarios (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            nome VARCHAR(255) NOT NULL,
            usuario VARCHAR(100) UNIQUE NOT NULL,
            senha_hash VARCHAR(255) NOT NULL,
            is_admin BOOLEAN DEFAULT FALSE,
            ativo BOOLEAN DEFAULT TRUE,
            nivel INTEGER DEFAULT 1,
            salario DECIMAL(10,2) DEFAULT 0,
            pode_abastecer BOOLEAN DEFAULT FALSE,
            pode_gerenciar_despesas BOOLEAN DEFAULT FALSE,
            pode_fazer_devolucao BOOLEAN DEFAULT FALSE,
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        )
    "#,
};

pub const PRODUTOS: TableDefinition = TableDefinition {
    name: "produtos",
    columns: &[
        "id",
        "codigo",
        "nome",
        "descricao",
        "preco_custo",
        "preco_venda",
        "estoque",
        "estoque_minimo",
        "ativo",
        "venda_por_peso",
        "unidade_medida",
        "created_at",
        "updated_at",
    ],
    create_sql: r#"
        CREATE TABLE produtos (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            codigo VARCHAR(50) UNIQUE NOT NULL,
            nome VARCHAR(255) NOT NULL,
            descricao TEXT,
            preco_custo DECIMAL(10,2) NOT NULL,
            preco_venda DECIMAL(10,2) NOT NULL,
            estoque DECIMAL(10,3) DEFAULT 0,
            estoque_minimo DECIMAL(10,3) DEFAULT 0,
            ativo BOOLEAN DEFAULT TRUE,
            venda_por_peso BOOLEAN DEFAULT FALSE,
            unidade_medida VARCHAR(10) DEFAULT 'un',
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        )
    "#,
};

pub const CLIENTES: TableDefinition = TableDefinition {
    name: "clientes",
    columns: &[
        "id",
        "nome",
        "nuit",
        "telefone",
        "email",
        "endereco",
        "created_at",
        "updated_at",
    ],
    create_sql: r#"
        CREATE TABLE clientes (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            nome VARCHAR(255) NOT NULL,
            nuit VARCHAR(50),
            telefone VARCHAR(50),
            email VARCHAR(255),
            endereco TEXT,
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        )
    "#,
};

pub const VENDAS: TableDefinition = TableDefinition {
    name: "vendas",
    columns: &[
        "id",
        "usuario_id",
        "total",
        "forma_pagamento",
        "valor_recebido",
        "troco",
        "data_venda",
        "created_at",
        "updated_at",
    ],
    create_sql: r#"
        CREATE TABLE vendas (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            usuario_id UUID NOT NULL REFERENCES usuarios(id),
            total DECIMAL(10,2) NOT NULL,
            forma_pagamento VARCHAR(50) NOT NULL,
            valor_recebido DECIMAL(10,2),
            troco DECIMAL(10,2),
            data_venda TIMESTAMP NOT NULL,
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        )
    "#,
};

// produto_id guarda o código do produto, sem FK.
pub const ITENS_VENDA: TableDefinition = TableDefinition {
    name: "itens_venda",
    columns: &[
        "id",
        "venda_id",
        "produto_id",
        "quantidade",
        "preco_unitario",
        "subtotal",
        "created_at",
        "updated_at",
    ],
    create_sql: r#"
        CREATE TABLE itens_venda (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            venda_id UUID NOT NULL REFERENCES vendas(id) ON DELETE CASCADE,
            produto_id VARCHAR(50) NOT NULL,
            quantidade DECIMAL(10,3) NOT NULL,
            preco_unitario DECIMAL(10,2) NOT NULL,
            subtotal DECIMAL(10,2) NOT NULL,
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        )
    "#,
};
